//! Test Helpers

use jiff::{ToSpan, Zoned, civil::date};

use crate::domain::{
    orders::{
        data::{NewDesignerOrder, NewPublicOrder, OrderType, PaymentMethod},
        records::OrderUuid,
    },
    products::{
        data::{Category, NewProduct, Size},
        records::ProductUuid,
    },
};

pub(crate) const TEST_PASSWORD: &str = "test-password-123";

pub(crate) fn new_product(name: &str, category: Category, price: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        category,
        image: "/uploads/1700000000000-saree.jpg".to_string(),
        short_description: format!("{name} short description"),
        full_description: format!("{name} full description"),
        features: vec!["Handwoven".to_string()],
        price,
        original_price: None,
        discount: 0,
        in_stock: true,
        sizes: vec![Size::FreeSize],
        colors: vec!["Red".to_string()],
        material: "Pure fabric".to_string(),
        blouse_length: Some("0.8m".to_string()),
        saree_length: Some("5.5m".to_string()),
        care_instructions: vec!["Dry clean only".to_string()],
        tags: Vec::new(),
    }
}

pub(crate) fn new_public_order() -> NewPublicOrder {
    NewPublicOrder {
        uuid: OrderUuid::new(),
        customer_name: "Asha".to_string(),
        customer_phone: "9876543210".to_string(),
        design: "Peacock motif border".to_string(),
        amount: 5000,
        advance_amount: 1000,
        payment_method: PaymentMethod::Cash,
        payment_status: None,
        order_placed_date: date(2026, 3, 1),
        expected_delivery_date: date(2026, 3, 20),
    }
}

pub(crate) fn new_designer_order() -> NewDesignerOrder {
    NewDesignerOrder {
        uuid: OrderUuid::new(),
        customer_name: "Lakshmi".to_string(),
        customer_phone: "9123456780".to_string(),
        customer_email: Some("lakshmi@example.com".to_string()),
        order_type: OrderType::CustomDesign,
        saree_type: "Kanjivaram".to_string(),
        material: "Silk".to_string(),
        color: "Gold".to_string(),
        design: "Temple border".to_string(),
        measurements: None,
        expected_delivery_date: Zoned::now().date().saturating_add(30.days()),
        payment_method: PaymentMethod::Cash,
        amount: 10_000,
        advance_amount: 3_000,
        special_instructions: None,
        fabric_swatch: None,
        design_sketch: None,
        upi_payment_proof: None,
    }
}
