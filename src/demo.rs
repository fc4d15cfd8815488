use crate::{Category, GameData, Question};

/// Highest score reachable with the built-in bank.
pub const DEMO_MAX_SCORE: u32 = 1800;

fn question(value: u32, prompt: &str, options: [&str; 4], correct_answer: usize) -> Question {
    Question {
        value,
        prompt: prompt.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer,
    }
}

pub fn demo_game_data() -> GameData {
    GameData {
        categories: vec![
            Category {
                name: "Headless Architecture".to_string(),
                questions: vec![
                    question(
                        100,
                        "What does \"headless\" mean in headless commerce?",
                        [
                            "The storefront is decoupled from the backend",
                            "The store has no product catalog",
                            "The site runs without a server",
                            "Checkout happens offline",
                        ],
                        0,
                    ),
                    question(
                        200,
                        "Which acronym describes the composable commerce principles?",
                        ["LAMP", "MACH", "SOLID", "CRUD"],
                        1,
                    ),
                    question(
                        300,
                        "In MACH, what does the \"H\" stand for?",
                        ["Hosted", "Hybrid", "Headless", "Hardened"],
                        2,
                    ),
                ],
            },
            Category {
                name: "APIs & Integrations".to_string(),
                questions: vec![
                    question(
                        100,
                        "Which query language lets clients ask for exactly the fields they need?",
                        ["SQL", "XPath", "GraphQL", "Regex"],
                        2,
                    ),
                    question(
                        200,
                        "What mechanism pushes an event to your endpoint when an order is placed?",
                        ["Webhook", "Cron job", "Polling loop", "Cookie"],
                        0,
                    ),
                    question(
                        300,
                        "Which HTTP status code signals that a client is being rate limited?",
                        ["401", "404", "500", "429"],
                        3,
                    ),
                ],
            },
            Category {
                name: "Frontend Performance".to_string(),
                questions: vec![
                    question(
                        100,
                        "What does CDN stand for?",
                        [
                            "Central Data Node",
                            "Content Delivery Network",
                            "Cached Domain Name",
                            "Core Delivery Net",
                        ],
                        1,
                    ),
                    question(
                        200,
                        "Which Core Web Vital measures loading performance?",
                        [
                            "Cumulative Layout Shift",
                            "Interaction to Next Paint",
                            "Largest Contentful Paint",
                            "Time to First Byte",
                        ],
                        2,
                    ),
                    question(
                        300,
                        "Which rendering strategy regenerates static pages in the background after deploy?",
                        [
                            "Client-side rendering",
                            "Incremental static regeneration",
                            "Server-side includes",
                            "Hot module replacement",
                        ],
                        1,
                    ),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionKey;

    #[test]
    fn values_follow_the_ladder() {
        let data = demo_game_data();

        for category in &data.categories {
            let values: Vec<u32> = category.questions.iter().map(|q| q.value).collect();
            assert_eq!(values, vec![100, 200, 300], "{}", category.name);
        }
    }

    #[test]
    fn total_matches_max_score_constant() {
        assert_eq!(demo_game_data().total_value(), DEMO_MAX_SCORE);
    }

    #[test]
    fn options_are_unique_within_each_question() {
        let data = demo_game_data();

        for (key, question) in data.questions() {
            let mut seen = std::collections::HashSet::new();
            for option in &question.options {
                assert!(seen.insert(option), "duplicate option in {key}");
            }
        }
    }

    #[test]
    fn lookup_by_key() {
        let data = demo_game_data();
        let question = data
            .question(QuestionKey::new(1, 2))
            .expect("question should exist");

        assert_eq!(question.options[question.correct_answer], "429");
    }
}
