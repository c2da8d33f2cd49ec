//! Static catalog of example prompts.
//!
//! A fixed lookup table with no behavior beyond name lookup. The session
//! loop (`:use <name>`) and `greenprompt optimize --example` read from it;
//! the entries cover the prompt categories the backend was tuned on.

/// A named example prompt.
#[derive(Debug, Clone, Copy)]
pub struct ExamplePrompt {
    pub name: &'static str,
    pub prompt: &'static str,
}

/// The example catalog, in display order.
pub const EXAMPLES: &[ExamplePrompt] = &[
    ExamplePrompt {
        name: "Article Summarization",
        prompt: "summarize this:\n\
            Boston Consulting Group, Inc. (BCG) is an American global management \
            consulting firm founded in 1963 and headquartered in Boston, \
            Massachusetts. It is one of the Big Three (or MBB, the world's three \
            largest management consulting firms by revenue) along with McKinsey & \
            Company and Bain & Company. Since 2021, BCG has been led by the German \
            executive Christoph Schweizer. The firm was founded in 1963 as part of \
            The Boston Safe Deposit and Trust Company. Bruce Henderson had been \
            recruited from Arthur D. Little to establish the consulting arm \
            operating as a subsidiary. Initially the division only advised clients \
            of the bank, with billings for the first month at just US$500. In 1966, \
            BCG opened its second office in Tokyo, Japan. In the 1970s, BCG created \
            and popularized the growth-share matrix, a chart to help large \
            corporations decide how to allocate cash among their business units. \
            The corporation would categorize its business units as Stars, Cash \
            Cows, Question Marks, or Dogs, and then allocate cash accordingly.",
    },
    ExamplePrompt {
        name: "Email Chain Summarization",
        prompt: "summarise this email chain for me:\n\
            Subject: Country-Specific Mappings for Google Shopping\n\
            John Lee (Mon, Sept 23, 22:18): Hi Mike, hi Jake, thank you for your \
            honest feedback. I completely understand your frustration, and I must \
            say that I am equally disappointed that the results did not meet your \
            expectations. We will discontinue our collaboration with Price API \
            immediately on this project. After careful consideration, we have two \
            options to propose: 1. A refund of the remaining balance of $1,200. \
            2. Ten hours of free AI consulting (valued at $1,800).\n\
            Jake Harris (Mon, Sept 23, 11:50): Hi John, we've invested a lot of \
            time and money, always holding onto the hope that the error was on our \
            end. Now that all products are listed and there's still no valid data \
            from Price API, I have to end the project here.\n\
            Mike Daniels (Tue, Sept 24, 09:30): Hello everyone, I have a third \
            proposal! We absolutely need a price monitoring tool. I suggest we \
            take another look at other pricing optimization software options.",
    },
    ExamplePrompt {
        name: "Chatbot with History",
        prompt: "System: You are a helpful assistant. Help the user with their questions.\n\
            User: What is the weather in Tokyo?\n\
            Assistant: The weather in Tokyo is currently sunny with a temperature of 22°C.\n\
            User: I am travelling to Tokyo next week, what should I pack?\n\
            Assistant: You should pack a light jacket and comfortable shoes. You \
            should prepare for rain as it is common in Tokyo.\n\
            User: What are the best places to visit in Tokyo? I am travelling with my family.\n\
            Assistant: You should visit the Tokyo Tower and the Senso-ji Temple \
            they are both very popular with families.\n\
            User: How much time should I allow for my trip and the locations you recommended?",
    },
    ExamplePrompt {
        name: "Code Review",
        prompt: "I have written a function in Python that calculates the factorial \
            of a given number using recursion. However, I am concerned about the \
            efficiency and potential issues when handling large numbers. Could you \
            review my code, point out any inefficiencies or improvements I could \
            make, and suggest alternatives if necessary? Here is the code:\n\
            def factorial(n):\n    if n == 0:\n        return 1\n    else:\n        \
            return n * factorial(n - 1)\n\
            Specifically, I'm interested in understanding whether recursion is the \
            best approach for this problem, whether there are any edge cases my \
            code might fail to handle, and any improvements I could make to \
            enhance readability or performance.",
    },
    ExamplePrompt {
        name: "Code Generation",
        prompt: "I'm working on a web application using React and TypeScript. I \
            need to create a reusable component for a dropdown menu that supports \
            dynamic options and includes basic accessibility features (like \
            keyboard navigation and ARIA roles). The component should accept an \
            array of options as props and render them in a dropdown format. Could \
            you generate the code for this dropdown component? Make sure the code \
            follows TypeScript best practices and includes comments explaining the \
            important parts.",
    },
    ExamplePrompt {
        name: "Translation",
        prompt: "I have an English paragraph that needs to be translated into \
            French for an official document. The translation should maintain a \
            formal tone and be as accurate as possible. Here's the paragraph:\n\
            'Our company is committed to delivering high-quality products that \
            meet international standards. We continuously strive to innovate and \
            improve our processes to better serve our clients and maintain our \
            position as a leader in the industry.'\n\
            Please provide the French translation, and also highlight any cultural \
            considerations or adjustments made during the translation process.",
    },
    ExamplePrompt {
        name: "Question Answering",
        prompt: "I'm researching the impact of climate change on polar bear \
            populations, and I have some specific questions. Could you help answer \
            them based on the latest scientific studies and data? 1. How has the \
            shrinking of sea ice affected the hunting patterns and habitat of \
            polar bears? 2. What are the main threats to polar bear survival apart \
            from habitat loss? 3. Are there any recent findings on polar bear \
            adaptation to changing conditions, such as shifts in diet or behavior? \
            Please provide detailed answers, referencing any relevant studies or \
            data sources from the past five years, focusing on the Arctic region.",
    },
];

/// Case-insensitive lookup by example name.
pub fn find(name: &str) -> Option<&'static ExamplePrompt> {
    EXAMPLES
        .iter()
        .find(|example| example.name.eq_ignore_ascii_case(name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_populated() {
        assert!(!EXAMPLES.is_empty());
        for example in EXAMPLES {
            assert!(!example.name.is_empty());
            assert!(!example.prompt.is_empty());
        }
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in EXAMPLES.iter().enumerate() {
            for b in &EXAMPLES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert!(find("code review").is_some());
        assert!(find("CODE REVIEW").is_some());
        assert!(find("Translation").is_some());
    }

    #[test]
    fn find_unknown_returns_none() {
        assert!(find("no such example").is_none());
    }
}
