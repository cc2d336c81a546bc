use askama::Template;

/// Body of the "set your password" email sent for a new account.
#[derive(Template)]
#[template(path = "email/password_link.html")]
pub struct PasswordLinkEmail<'a> {
    pub name: &'a str,
    pub user_id: &'a str,
    pub reset_url: &'a str,
}

pub fn render_password_link(name: &str, user_id: &str, reset_url: &str) -> Result<String, String> {
    PasswordLinkEmail {
        name,
        user_id,
        reset_url,
    }
    .render()
    .map_err(|e| format!("Failed to render email: {e}"))
}
