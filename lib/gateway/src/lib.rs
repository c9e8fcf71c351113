mod alert_workflow;
pub use alert_workflow::AlertWorkflow;

mod api;
pub use api::Api;

mod error;
pub use error::{AcknowledgeFailure, ErasedError, Error};

mod gateway;
pub use gateway::{classify, Reply, RequestGateway, RequestOptions, JSON_CONTENT_TYPE};

mod navigation;
pub use navigation::{home_route, AuthExpiredHandler, RouteState, SignOut, LOGIN_ROUTE};

mod role_router;
pub use role_router::{resolve_prefix, ADMIN_PREFIX, USER_PREFIX};

mod session_store;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};

mod transport;
pub use transport::{ChippTransport, HttpRequest, HttpResponse, Method, Transport};

pub type Result<T> = std::result::Result<T, Error>;
