//! 商品目录数据模型

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 商品文档（集合 `products`）
///
/// `price` 以最小货币单位存储。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
}

/// 商品查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Featured,
    Category(String),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Featured => product.is_featured,
            ProductFilter::Category(category) => product.category == *category,
        }
    }
}

/// 对外输出的商品视图，`_id` 为十六进制字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
    pub category: String,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()),
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            category: product.category,
            is_featured: product.is_featured,
        }
    }
}
