//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    forms::{FieldError, FormFields},
    observability,
    orders::{
        OrderMessageResponse, into_status_error,
        requests::{DesignerOrderForm, OrderUploads},
    },
    state::State,
    uploads::{StoredUpload, UploadError, UploadStore},
};

const FABRIC_SWATCH: &str = "fabricSwatch";
const DESIGN_SKETCH: &str = "designSketch";
const UPI_PAYMENT_PROOF: &str = "upiPaymentProof";

/// Create Order Handler
///
/// Staff order entry. Accepts `multipart/form-data` with optional
/// `fabricSwatch`, `designSketch` and `upiPaymentProof` images.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Access token required"),
        (status_code = StatusCode::FORBIDDEN, description = "Designer or admin access required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let form = state.uploads.read_form(req, 3).await?;
    let fields = FormFields::new(form);

    let order = DesignerOrderForm::parse(&fields).map_err(FieldError::into_status_error)?;

    let mut stored = Vec::new();

    let uploads = match store_uploads(&state.uploads, &fields, order.upload_label(), &mut stored).await {
        Ok(uploads) => uploads,
        Err(error) => {
            state.uploads.discard(&stored).await;

            return Err(error.into_status_error());
        }
    };

    let record = match state
        .app
        .orders
        .create_designer_order(principal, order.into_new_order(uploads))
        .await
    {
        Ok(record) => record,
        Err(error) => {
            state.uploads.discard(&stored).await;

            return Err(into_status_error(error));
        }
    };

    res.add_header(LOCATION, format!("/api/orders/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(
        order_uuid = %record.uuid,
        designer = %principal.username,
        attachments = stored.len(),
        "created order"
    );

    observability::record_order_created("designer");

    Ok(Json(OrderMessageResponse::new(
        "Order created successfully",
        record,
    )))
}

/// Store whichever attachments were sent. Every stored file is pushed onto
/// `stored` so the caller can discard them all if a later step fails.
async fn store_uploads(
    store: &UploadStore,
    fields: &FormFields<'_>,
    label: &str,
    stored: &mut Vec<StoredUpload>,
) -> Result<OrderUploads, UploadError> {
    let mut uploads = OrderUploads::default();

    for (name, slot) in [
        (FABRIC_SWATCH, &mut uploads.fabric_swatch),
        (DESIGN_SKETCH, &mut uploads.design_sketch),
        (UPI_PAYMENT_PROOF, &mut uploads.upi_payment_proof),
    ] {
        if let Some(file) = fields.file(name) {
            let upload = store.store(file, label).await?;

            *slot = Some(upload.url.clone());
            stored.push(upload);
        }
    }

    Ok(uploads)
}
