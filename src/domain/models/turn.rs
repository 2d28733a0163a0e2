use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Instructions for the model. Never displayed to the student.
    Instruction,
    Assistant,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: &str) -> Turn {
        return Turn {
            role,
            text: text.to_string(),
        };
    }

    pub fn instruction(text: &str) -> Turn {
        return Turn::new(Role::Instruction, text);
    }

    pub fn assistant(text: &str) -> Turn {
        return Turn::new(Role::Assistant, text);
    }

    pub fn user(text: &str) -> Turn {
        return Turn::new(Role::User, text);
    }
}
