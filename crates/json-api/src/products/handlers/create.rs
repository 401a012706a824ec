//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    forms::{FieldError, FormFields},
    products::{ProductMessageResponse, into_status_error, requests::ProductForm},
    state::State,
    uploads::UploadError,
};

/// Create Product Handler
///
/// Accepts `multipart/form-data` with the product fields and an `image` file.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields or image"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = state.uploads.read_form(req, 1).await?;
    let fields = FormFields::new(form);

    let product = ProductForm::parse(&fields).map_err(FieldError::into_status_error)?;

    let image = fields
        .file("image")
        .ok_or_else(|| StatusError::bad_request().brief("Product image is required"))?;

    let stored = state
        .uploads
        .store(image, product.image_label())
        .await
        .map_err(UploadError::into_status_error)?;

    let created = match product.into_new_product(stored.url.clone()) {
        Ok(new_product) => state.app.products.create_product(new_product).await.map_err(into_status_error),
        Err(error) => Err(error.into_status_error()),
    };

    let record = match created {
        Ok(record) => record,
        Err(error) => {
            state.uploads.discard(&[stored]).await;

            return Err(error);
        }
    };

    res.add_header(LOCATION, format!("/api/products/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(product_uuid = %record.uuid, name = %record.name, "created product");

    Ok(Json(ProductMessageResponse::new(
        "Product created successfully",
        record,
    )))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use sowraashi_app::domain::products::{
        MockProductsService, ProductsServiceError, data::Category,
    };

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{Multipart, TEST_MAX_UPLOAD, TestServices},
    };

    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
    }

    fn complete_form() -> Multipart {
        Multipart::new()
            .text("name", "Kanjivaram Silk")
            .text("category", "silk")
            .text("shortDescription", "Handwoven temple border")
            .text("fullDescription", "Pure mulberry silk with zari work.")
            .text("price", "1299900")
            .text("material", "Silk")
            .text("sizes", r#"["Free Size"]"#)
    }

    #[tokio::test]
    async fn test_create_product_stores_image() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.name == "Kanjivaram Silk"
                    && new.category == Category::Silk
                    && new.price == 1_299_900
                    && new.image.starts_with("/uploads/kanjivaram-silk-")
                    && new.image.ends_with(".png")
            })
            .return_once(|new| {
                let mut record = make_product(new.uuid, new.price);
                record.image = new.image;

                Ok(record)
            });

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let request = complete_form()
            .file("image", "saree.png", "image/png", PNG)
            .attach(TestClient::post("http://example.com/products"));

        let mut res = request.send(&service).await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        let body: ProductMessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{}", body.product.uuid)));
        assert_eq!(body.message, "Product created successfully");
        assert_eq!(files_in(&uploads), 1, "image should be kept on disk");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_accepts_images_above_default_body_cap() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|new| Ok(make_product(new.uuid, new.price)));

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let mut image = PNG.to_vec();
        image.resize(200 * 1024, 0);

        let res = complete_form()
            .file("image", "saree.png", "image/png", &image)
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(files_in(&uploads), 1, "large image should be stored");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_body_over_form_limit_returns_413() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let image = vec![0_u8; usize::try_from(TEST_MAX_UPLOAD)? + 128 * 1024];

        let res = complete_form()
            .file("image", "saree.png", "image/png", &image)
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));
        assert_eq!(files_in(&uploads), 0, "nothing should be written");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_image_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let service = TestServices::new()
            .with_products(products)
            .service(Router::with_path("products").post(handler));

        let res = complete_form()
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_non_image_upload() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let res = complete_form()
            .file("image", "notes.txt", "text/plain", b"hello")
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(files_in(&uploads), 0, "nothing should be written");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_missing_field_discards_image() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let res = Multipart::new()
            .text("name", "Kanjivaram Silk")
            .text("category", "silk")
            .file("image", "saree.png", "image/png", PNG)
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(files_in(&uploads), 0, "orphaned image should be removed");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_conflict_discards_image() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let services = TestServices::new().with_products(products);
        let uploads = services.uploads_dir();
        let service = services.service(Router::with_path("products").post(handler));

        let res = complete_form()
            .file("image", "saree.png", "image/png", PNG)
            .attach(TestClient::post("http://example.com/products"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(files_in(&uploads), 0, "orphaned image should be removed");

        Ok(())
    }
}
