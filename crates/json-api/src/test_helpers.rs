//! Test helpers.

use std::{path::PathBuf, sync::Arc};

use salvo::{
    affix_state::inject,
    http::header::CONTENT_TYPE,
    prelude::*,
    test::RequestBuilder,
};
use uuid::Uuid;

use sowraashi_app::{
    auth::{MockAuthService, Principal, Role, UserUuid},
    context::AppContext,
    domain::{orders::MockOrdersService, products::MockProductsService},
};

use crate::{extensions::*, state::State, uploads::UploadStore};

/// Upload ceiling used by handler tests.
pub(crate) const TEST_MAX_UPLOAD: u64 = 512 * 1024;

pub(crate) fn principal(username: &str, role: Role) -> Principal {
    Principal {
        user_uuid: UserUuid::new(),
        username: username.to_string(),
        role,
        name: format!("{username} (test)"),
    }
}

/// Stands in for the auth middleware by injecting a fixed principal.
#[derive(Debug)]
pub(crate) struct InjectPrincipal(Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn as_principal(principal: Principal) -> InjectPrincipal {
    InjectPrincipal(principal)
}

pub(crate) fn as_role(role: Role) -> InjectPrincipal {
    as_principal(principal(role.as_str(), role))
}

/// Mocked services wired into a routable [`Service`].
///
/// Mocks that a test does not replace reject every call.
pub(crate) struct TestServices {
    auth: MockAuthService,
    products: MockProductsService,
    orders: MockOrdersService,
    uploads: PathBuf,
}

impl TestServices {
    pub(crate) fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            products: MockProductsService::new(),
            orders: MockOrdersService::new(),
            uploads: std::env::temp_dir().join(format!("sowraashi-uploads-{}", Uuid::now_v7())),
        }
    }

    pub(crate) fn with_auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn with_products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn uploads_dir(&self) -> PathBuf {
        self.uploads.clone()
    }

    pub(crate) fn state(self) -> Arc<State> {
        let app = AppContext {
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
        };

        State::shared(app, UploadStore::new(self.uploads, TEST_MAX_UPLOAD))
    }

    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }
}

/// A hand-built `multipart/form-data` body.
#[derive(Debug)]
pub(crate) struct Multipart {
    boundary: String,
    body: Vec<u8>,
}

impl Multipart {
    pub(crate) fn new() -> Self {
        Self {
            boundary: format!("sowraashi-{}", Uuid::now_v7().simple()),
            body: Vec::new(),
        }
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.part_header(name, None);
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub(crate) fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.part_header(name, Some((file_name, content_type)));
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Set the body and content type of `request`.
    pub(crate) fn attach(mut self, request: RequestBuilder) -> RequestBuilder {
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);

        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        request
            .add_header(CONTENT_TYPE, content_type, true)
            .body(self.body)
    }

    fn part_header(&mut self, name: &str, file: Option<(&str, &str)>) {
        let header = match file {
            Some((file_name, content_type)) => format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            ),
            None => format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n",
                self.boundary
            ),
        };

        self.body.extend_from_slice(header.as_bytes());
    }
}
