// Askama template definitions

use askama::Template;

use crate::db::Article;

// Login form
#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct LoginTemplate {
    pub name: String,
    pub invalid: bool,
    /// Form was valid but the credentials did not match
    pub failed: bool,
}

// Registration form
#[derive(Template, Default)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub name: String,
    pub invalid: bool,
    pub name_taken: bool,
}

// A user's own articles
#[derive(Template)]
#[template(path = "person.html")]
pub struct DashboardTemplate {
    pub name: String,
    pub user_id: i64,
    pub articles: Vec<Article>,
}

// Article form
#[derive(Template, Default)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub invalid: bool,
    pub auth_required: bool,
}

#[derive(Template)]
#[template(path = "read.html")]
pub struct ReadTemplate {
    pub article: Article,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}
