//! 商品种子数据
//!
//! 参考商品列表以 JSON 文件维护（`fixtures/products.json`），编译时嵌入，
//! 也可以通过 `seed.fixture_path` 指向外部文件。

use std::fs;
use std::path::Path;

use validator::Validate;

use super::model::Product;
use crate::core::error::SeedError;

/// 内置参考商品列表
pub const REFERENCE_FIXTURE: &str = include_str!("../../../fixtures/products.json");

/// 解析并校验内置商品列表
pub fn reference_products() -> Result<Vec<Product>, SeedError> {
    parse_products(REFERENCE_FIXTURE)
}

/// 从文件加载商品列表
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, SeedError> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        SeedError::Fixture(format!("无法读取 {}: {}", path.as_ref().display(), e))
    })?;
    parse_products(&content)
}

/// 解析 JSON 商品数组，并逐条校验
pub fn parse_products(content: &str) -> Result<Vec<Product>, SeedError> {
    let products: Vec<Product> =
        serde_json::from_str(content).map_err(|e| SeedError::Fixture(e.to_string()))?;

    if products.is_empty() {
        return Err(SeedError::Fixture("商品列表为空".to_string()));
    }

    for (index, product) in products.iter().enumerate() {
        validate_product(product)
            .map_err(|msg| SeedError::Fixture(format!("第 {} 条商品: {}", index + 1, msg)))?;
    }

    Ok(products)
}

fn validate_product(product: &Product) -> Result<(), String> {
    if product.id.is_some() {
        return Err("不应包含 _id".to_string());
    }

    product.validate().map_err(|err| {
        let messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.join(", ")
    })?;

    if !(product.image.starts_with("https://") || product.image.starts_with("http://")) {
        return Err("image must be an http(s) URL".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_fixture_has_ten_products() {
        let products = reference_products().unwrap();
        assert_eq!(products.len(), 10);

        let first = &products[0];
        assert_eq!(first.name, "Nike Air Max 270");
        assert_eq!(first.price, 8999);
        assert_eq!(first.category, "shoes");
        assert!(first.is_featured);

        let featured = products.iter().filter(|p| p.is_featured).count();
        assert_eq!(featured, 5);
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(matches!(parse_products("[]"), Err(SeedError::Fixture(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(parse_products("{"), Err(SeedError::Fixture(_))));
    }

    #[test]
    fn test_rejects_invalid_record() {
        let content = r#"[
            {"name":"ok","price":1,"image":"https://e.com/a.jpg","category":"shoes"},
            {"name":"","price":1,"image":"https://e.com/b.jpg","category":"shoes"}
        ]"#;
        let err = parse_products(content).unwrap_err();
        assert!(err.to_string().contains("第 2 条商品"));
    }

    #[test]
    fn test_rejects_negative_price_and_non_http_image() {
        let negative = r#"[{"name":"a","price":-1,"image":"https://e.com/a.jpg","category":"shoes"}]"#;
        assert!(parse_products(negative).is_err());

        let ftp = r#"[{"name":"a","price":1,"image":"ftp://e.com/a.jpg","category":"shoes"}]"#;
        assert!(parse_products(ftp).is_err());
    }

    #[test]
    fn test_load_products_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, REFERENCE_FIXTURE).unwrap();

        assert_eq!(load_products(&path).unwrap().len(), 10);
        assert!(load_products(dir.path().join("missing.json")).is_err());
    }
}
