use super::{Name, RecordClass, RecordType};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: Name,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: Name, record_type: RecordType) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
        }
    }

    pub fn with_class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }
}
