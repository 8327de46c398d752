use serde::Serialize;

/// One fully rendered transactional email, independent of how it is delivered.
///
/// Only the builders in this module construct it, so every field is always set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContent {
    title: String,
    subject: String,
    link: String,
    link_name: String,
    message: String,
}

impl EmailContent {
    pub(crate) fn new(template: &Template, link: String, message: String) -> Self {
        Self {
            title: template.title.to_string(),
            subject: template.subject.to_string(),
            link,
            link_name: template.link_name.to_string(),
            message,
        }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn subject(&self) -> &str { &self.subject }
    pub fn link(&self) -> &str { &self.link }
    pub fn link_name(&self) -> &str { &self.link_name }
    pub fn message(&self) -> &str { &self.message }

    /// Plain-text body used by transports that do not render HTML.
    pub fn text_body(&self) -> String {
        format!("{}\n\n{}\n{}: {}\n", self.title, self.message, self.link_name, self.link)
    }
}

/// Fixed presentation of one email kind.
#[derive(Debug)]
pub(crate) struct Template {
    pub title: &'static str,
    pub subject: &'static str,
    pub link_name: &'static str,
    pub path: &'static str,
}
