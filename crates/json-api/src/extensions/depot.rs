//! Typed depot access for handlers.

use std::any::{Any, type_name};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use sowraashi_app::auth::Principal;

/// Pull shared state and the authenticated caller out of the depot.
pub(crate) trait DepotExt {
    /// Injected state, or a 500 when the router was assembled without it.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, or a 401 when the route skipped authentication.
    fn principal_or_401(&self) -> Result<&Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(state = type_name::<T>(), "missing from depot");

            StatusError::internal_server_error()
        })
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.obtain::<Principal>()
            .map_err(|_missing| StatusError::unauthorized().brief("Access token required"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use sowraashi_app::auth::Role;

    use crate::test_helpers::principal;

    use super::*;

    #[test]
    fn missing_state_is_a_server_error() {
        let depot = Depot::new();

        let code = depot.obtain_or_500::<String>().err().map(|error| error.code);

        assert_eq!(code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn principal_round_trips_through_the_depot() {
        let mut depot = Depot::new();

        assert_eq!(
            depot.principal_or_401().err().map(|error| error.code),
            Some(StatusCode::UNAUTHORIZED)
        );

        depot.insert_principal(principal("meera", Role::Designer));

        assert_eq!(
            depot.principal_or_401().ok().map(|p| p.role),
            Some(Role::Designer)
        );
    }
}
