//! 订单数据模型（只读，由下单逻辑持有）

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: i64,
    #[serde(default)]
    pub products: Vec<OrderLine>,
}

/// 订单行：商品引用、数量、单价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: String,
    pub quantity: u32,
    pub price: i64,
}
