//! Emails that carry a one-click confirmation token.

use serde::{Deserialize, Serialize};

use super::content::{EmailContent, Template};
use super::links::AppLinks;

pub const TOKEN_PARAM: &str = "token";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationTokenKind {
    Activation,
    PasswordReset,
}

const ACTIVATION: Template = Template {
    title: "Account activation",
    subject: "WorldOfToys account activation",
    link_name: "Activate account",
    path: "activate",
};

const PASSWORD_RESET: Template = Template {
    title: "Password reset",
    subject: "WorldOfToys password reset",
    link_name: "Reset password",
    path: "reset-password",
};

const ACTIVATION_MESSAGE: &str =
    "Thank you for registering at WorldOfToys! To activate your account, follow the link below:";
const PASSWORD_RESET_MESSAGE: &str =
    "We received a request to reset your WorldOfToys password. To choose a new password, follow the link below:";

impl ConfirmationTokenKind {
    fn template(self) -> (&'static Template, &'static str) {
        match self {
            Self::Activation => (&ACTIVATION, ACTIVATION_MESSAGE),
            Self::PasswordReset => (&PASSWORD_RESET, PASSWORD_RESET_MESSAGE),
        }
    }
}

/// Renders the email for a freshly issued token. The token is passed through verbatim.
pub fn confirmation_email(links: &AppLinks, kind: ConfirmationTokenKind, token: &str) -> EmailContent {
    let (template, message) = kind.template();
    let link = links.link(template.path, &[(TOKEN_PARAM, token)]);
    EmailContent::new(template, link, message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn links() -> AppLinks { AppLinks::new("https://worldoftoys.example.com").unwrap() }

    fn token_of(link: &str) -> Vec<String> {
        Url::parse(link).unwrap()
            .query_pairs()
            .filter(|(k, _)| k == TOKEN_PARAM)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn test_activation_email() {
        let email = confirmation_email(&links(), ConfirmationTokenKind::Activation, "abc123");
        assert_eq!(email.title(), "Account activation");
        assert_eq!(email.subject(), "WorldOfToys account activation");
        assert_eq!(email.link_name(), "Activate account");
        assert!(email.link().ends_with("/activate?token=abc123"));
        assert_eq!(email.message(), ACTIVATION_MESSAGE);
    }

    #[test]
    fn test_password_reset_email() {
        let email = confirmation_email(&links(), ConfirmationTokenKind::PasswordReset, "r-9");
        assert_eq!(email.title(), "Password reset");
        assert_eq!(email.link(), "https://worldoftoys.example.com/reset-password?token=r-9");
    }

    #[test]
    fn test_token_round_trips_through_link() {
        for kind in [ConfirmationTokenKind::Activation, ConfirmationTokenKind::PasswordReset] {
            for token in ["abc123", "a/b+c=d", "ünïcode token"] {
                let email = confirmation_email(&links(), kind, token);
                assert_eq!(token_of(email.link()), vec![token.to_string()]);
            }
        }
    }
}
