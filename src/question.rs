use std::fmt;
use std::str::FromStr;

/// Number of categories on the board.
pub const CATEGORY_COUNT: usize = 3;
/// Number of questions in every category.
pub const QUESTIONS_PER_CATEGORY: usize = 3;
/// Number of cells on the board. The game is complete once this many are answered.
pub const TOTAL_QUESTIONS: usize = CATEGORY_COUNT * QUESTIONS_PER_CATEGORY;
/// Number of answer options shown for every question.
pub const OPTION_COUNT: usize = 4;

/// A single trivia question.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Points awarded for a correct answer.
    pub value: u32,
    /// Text shown as the question prompt.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Index in `options` that contains the correct answer.
    pub correct_answer: usize,
}

impl Question {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer
    }

    /// Letter label for an option, `A` for the first one.
    pub fn option_label(option_index: usize) -> char {
        char::from(b'A' + (option_index % 26) as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<Question>,
}

/// The full question bank shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameData {
    pub categories: Vec<Category>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BankError {
    #[error("expected {expected} categories but found {found}")]
    WrongCategoryCount { expected: usize, found: usize },
    #[error("category {category} must have {expected} questions but has {found}")]
    WrongQuestionCount {
        category: usize,
        expected: usize,
        found: usize,
    },
    #[error("question {key} must have {expected} options but has {found}")]
    WrongOptionCount {
        key: QuestionKey,
        expected: usize,
        found: usize,
    },
    #[error("question {key} marks option {index} as correct but only has {options} options")]
    CorrectAnswerOutOfRange {
        key: QuestionKey,
        index: usize,
        options: usize,
    },
}

impl GameData {
    pub fn question(&self, key: QuestionKey) -> Option<&Question> {
        self.categories
            .get(key.category)?
            .questions
            .get(key.question)
    }

    /// Iterates over every question together with its board position.
    pub fn questions(&self) -> impl Iterator<Item = (QuestionKey, &Question)> {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(category, entry)| {
                entry
                    .questions
                    .iter()
                    .enumerate()
                    .map(move |(question, item)| (QuestionKey::new(category, question), item))
            })
    }

    /// Finds the position of a question that compares equal to `question`.
    pub fn key_of(&self, question: &Question) -> Option<QuestionKey> {
        self.questions()
            .find(|(_, candidate)| *candidate == question)
            .map(|(key, _)| key)
    }

    /// Sum of every question value in the bank.
    pub fn total_value(&self) -> u32 {
        self.questions().map(|(_, question)| question.value).sum()
    }

    /// Checks the bank against the fixed board shape.
    ///
    /// # Errors
    /// Returns the first [`BankError`] found, walking categories and questions in order.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.categories.len() != CATEGORY_COUNT {
            return Err(BankError::WrongCategoryCount {
                expected: CATEGORY_COUNT,
                found: self.categories.len(),
            });
        }

        for (index, category) in self.categories.iter().enumerate() {
            if category.questions.len() != QUESTIONS_PER_CATEGORY {
                return Err(BankError::WrongQuestionCount {
                    category: index,
                    expected: QUESTIONS_PER_CATEGORY,
                    found: category.questions.len(),
                });
            }
        }

        for (key, question) in self.questions() {
            if question.options.len() != OPTION_COUNT {
                return Err(BankError::WrongOptionCount {
                    key,
                    expected: OPTION_COUNT,
                    found: question.options.len(),
                });
            }
            if question.correct_answer >= question.options.len() {
                return Err(BankError::CorrectAnswerOutOfRange {
                    key,
                    index: question.correct_answer,
                    options: question.options.len(),
                });
            }
        }

        Ok(())
    }
}

/// Board position of a question, written as `"<category>-<question>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey {
    pub category: usize,
    pub question: usize,
}

impl QuestionKey {
    pub const fn new(category: usize, question: usize) -> Self {
        Self { category, question }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.question)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid question key: {0:?}")]
pub struct KeyParseError(pub String);

impl FromStr for QuestionKey {
    type Err = KeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (category, question) = value
            .split_once('-')
            .ok_or_else(|| KeyParseError(value.to_string()))?;

        // Plain decimal only, so every key has exactly one spelling.
        let parse = |part: &str| {
            let canonical = !part.is_empty()
                && part.bytes().all(|byte| byte.is_ascii_digit())
                && (part == "0" || !part.starts_with('0'));
            if !canonical {
                return Err(KeyParseError(value.to_string()));
            }

            part.parse::<usize>()
                .map_err(|_| KeyParseError(value.to_string()))
        };

        Ok(Self::new(parse(category)?, parse(question)?))
    }
}

impl serde::Serialize for QuestionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for QuestionKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
