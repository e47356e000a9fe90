//! Server-side view rendering. Handlers hand these templates a fully shaped
//! view model; no data access happens here.

use askama::Template;

use quill_types::session::Session;
use quill_types::views::{CommentView, PostView};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<PostView>,
    pub search_term: Option<String>,
    pub session: Session,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub session: Session,
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateTemplate {
    pub session: Session,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub session: Session,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub session: Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostView {
        PostView {
            id: 1,
            title: "Hello".into(),
            content: "World".into(),
            created: "2025-01-01 12:00:00".into(),
            image: None,
            author: "alice".into(),
        }
    }

    #[test]
    fn index_renders_posts_and_search_term() {
        let html = IndexTemplate {
            posts: vec![sample_post()],
            search_term: Some("hello".into()),
            session: Session::anonymous(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Hello"));
        assert!(html.contains("alice"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn post_page_renders_comments() {
        let html = PostTemplate {
            post: sample_post(),
            comments: vec![CommentView {
                id: 7,
                content: "nice post".into(),
                created: "2025-01-01 12:05:00".into(),
                post_id: 1,
                author: "bob".into(),
            }],
            session: Session::logged_in("bob", false),
        }
        .render()
        .unwrap();

        assert!(html.contains("nice post"));
        assert!(html.contains("bob"));
    }

    #[test]
    fn login_page_shows_inline_error() {
        let html = LoginTemplate {
            error: Some("Incorrect username or password. Please try again.".into()),
            session: Session::anonymous(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Incorrect username or password"));
    }

    #[test]
    fn template_escaping_defuses_markup() {
        let mut post = sample_post();
        post.title = "x&y".into();
        let html = IndexTemplate {
            posts: vec![post],
            search_term: None,
            session: Session::anonymous(),
        }
        .render()
        .unwrap();

        assert!(html.contains("x&amp;y"));
    }
}

