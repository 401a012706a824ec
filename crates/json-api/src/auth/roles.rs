//! Role gates layered after the auth middleware.

use salvo::prelude::*;
use tracing::warn;

use sowraashi_app::auth::{ADMIN_ONLY, Role, STAFF};

use crate::extensions::*;

/// Only administrators pass.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(ADMIN_ONLY, "Admin access required", req, depot, res, ctrl).await;
}

/// Administrators and designers pass.
#[salvo::handler]
pub(crate) async fn require_staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    gate(STAFF, "Designer or admin access required", req, depot, res, ctrl).await;
}

async fn gate(
    allowed: &[Role],
    brief: &'static str,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verdict = depot
        .principal_or_401()
        .and_then(|principal| {
            principal.role.authorize(allowed).map_err(|forbidden| {
                warn!(
                    username = %principal.username,
                    role = %forbidden.role,
                    path = %req.uri().path(),
                    "role check failed"
                );

                StatusError::forbidden().brief(brief)
            })
        });

    if let Err(error) = verdict {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
