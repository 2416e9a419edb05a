use crate::session::SessionHandle;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Attaches the signed-in user's token to outgoing database requests.
///
/// The database authenticates callers through an `auth` query parameter
/// carrying the identity token. Requests made before anyone signs in are
/// forwarded untouched and hit the database's public rules.
pub struct SessionMiddleware {
    session: SessionHandle,
}

impl SessionMiddleware {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Middleware for SessionMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if let Some(token) = self.session.id_token() {
            let mut url = req.url().clone();
            url.query_pairs_mut().append_pair("auth", &token);
            *req.url_mut() = url;
        }

        next.run(req, extensions).await
    }
}
