use bson::{Document, doc};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ApplicationQuery {
    pub email: Option<String>,
    pub category: Option<String>,
}

impl ApplicationQuery {
    pub fn new(email: Option<String>, category: Option<String>) -> Self {
        ApplicationQuery {
            email: email.filter(|e| !e.is_empty()),
            category: category.filter(|c| !c.is_empty()),
        }
    }

    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(email) = &self.email {
            filter.insert("email", email.as_str());
        }
        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }
        filter
    }
}

pub fn existing(job_id: &str, email: &str) -> Document {
    doc! { "job_id": job_id, "email": email }
}
