use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Mentor,
    Model,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return Config::get(ConfigKey::Username),
            Author::Mentor => return String::from("Mentor"),
            Author::Model => return Config::get(ConfigKey::Model),
        }
    }
}
