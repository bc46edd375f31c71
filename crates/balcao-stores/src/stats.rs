// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Billing statistics: normalization of backend payloads and the
//! consolidated merge across stores.
//!
//! Backends disagree on field names (`sales_count` vs `sales`, `amount` vs
//! `value`), so normalization is tolerant. The merge itself is pure so it
//! can be tested without any HTTP.

use std::collections::{BTreeMap, HashMap};

use balcao_config::model::StoreConfig;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::client::StoreClient;

/// Revenue and sale count for one time bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub revenue: f64,
    pub count: u64,
}

/// Per-bucket statistics for one store or for the consolidated view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: PeriodStats,
    pub week: PeriodStats,
    pub month: PeriodStats,
    pub total: PeriodStats,
}

/// Sales count for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub name: String,
    pub sales: u64,
}

/// One recent sale, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSale {
    pub id: String,
    pub value: f64,
    pub email: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Value>,
}

/// One point of the revenue chart, keyed by date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub sales_count: u64,
    pub total_amount: f64,
}

/// A single store's normalized dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub stats: DashboardStats,
    pub top_products: Vec<ProductSales>,
    pub recent_sales: Vec<RecentSale>,
    pub chart_data: Vec<ChartPoint>,
}

/// A store's contribution to the consolidated view. `data` is `None` when
/// the backend failed or returned garbage that cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePayload {
    pub key: String,
    pub name: String,
    pub data: Option<StoreStats>,
}

/// The merged dashboard across all stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consolidated {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub stats: DashboardStats,
    pub top_products: Vec<ProductSales>,
    pub recent_sales: Vec<RecentSale>,
    pub chart_data: Vec<ChartPoint>,
    pub stores: Vec<StorePayload>,
}

const TOP_LIMIT: usize = 10;

fn get_f64(value: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|k| value.get(k).and_then(Value::as_f64))
        .unwrap_or(0.0)
}

fn get_u64(value: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|k| value.get(k).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn get_string(value: &Value, keys: &[&str]) -> String {
    for k in keys {
        match value.get(k) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn period(value: &Value, key: &str) -> PeriodStats {
    let bucket = value.get(key).cloned().unwrap_or(Value::Null);
    PeriodStats {
        revenue: get_f64(&bucket, &["total"]),
        count: get_u64(&bucket, &["count"]),
    }
}

/// Normalize a raw backend dashboard payload.
///
/// Missing or mistyped fields contribute zeroes rather than errors; a store
/// that sends garbage is indistinguishable from a store with no sales.
pub fn normalize(raw: &Value) -> StoreStats {
    let stats = DashboardStats {
        today: period(raw, "today"),
        week: period(raw, "week"),
        month: period(raw, "month"),
        total: period(raw, "allTime"),
    };

    let top_products = raw
        .get("topProducts")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|p| ProductSales {
                    name: get_string(p, &["name"]),
                    sales: get_u64(p, &["sales_count", "sales"]),
                })
                .collect()
        })
        .unwrap_or_default();

    let recent_sales = raw
        .get("recentSales")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|s| RecentSale {
                    id: get_string(s, &["id"]),
                    value: get_f64(s, &["amount", "value"]),
                    email: get_string(s, &["customer_email", "email"]),
                    status: "completed".to_string(),
                    products: s
                        .get("product_names")
                        .or_else(|| s.get("products"))
                        .cloned(),
                })
                .collect()
        })
        .unwrap_or_default();

    let chart_data = raw
        .get("chartData")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|c| ChartPoint {
                    date: get_string(c, &["date"]),
                    sales_count: get_u64(c, &["sales_count"]),
                    total_amount: get_f64(c, &["total_amount"]),
                })
                .collect()
        })
        .unwrap_or_default();

    StoreStats {
        stats,
        top_products,
        recent_sales,
        chart_data,
    }
}

fn add_period(acc: &mut PeriodStats, p: PeriodStats) {
    acc.revenue += p.revenue;
    acc.count += p.count;
}

/// Merge per-store payloads into the consolidated dashboard.
///
/// - per-bucket revenue/count are summed; an absent store contributes zero
/// - top products are merged by summing per-name sales, top 10 descending
/// - recent sales keep the 10 highest numeric ids, descending
/// - chart points sharing a date are summed, ascending by date string
pub fn consolidate(payloads: Vec<StorePayload>) -> Consolidated {
    let mut stats = DashboardStats::default();
    let mut product_sales: HashMap<String, u64> = HashMap::new();
    let mut recent_sales: Vec<RecentSale> = Vec::new();
    let mut chart: BTreeMap<String, (u64, f64)> = BTreeMap::new();

    let stores: Vec<StorePayload> = payloads.into_iter().filter(|p| p.data.is_some()).collect();

    for payload in &stores {
        let Some(data) = &payload.data else { continue };

        add_period(&mut stats.today, data.stats.today);
        add_period(&mut stats.week, data.stats.week);
        add_period(&mut stats.month, data.stats.month);
        add_period(&mut stats.total, data.stats.total);

        for product in &data.top_products {
            *product_sales.entry(product.name.clone()).or_insert(0) += product.sales;
        }

        recent_sales.extend(data.recent_sales.iter().cloned());

        for point in &data.chart_data {
            let entry = chart.entry(point.date.clone()).or_insert((0, 0.0));
            entry.0 += point.sales_count;
            entry.1 += point.total_amount;
        }
    }

    let mut top_products: Vec<ProductSales> = product_sales
        .into_iter()
        .map(|(name, sales)| ProductSales { name, sales })
        .collect();
    top_products.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.name.cmp(&b.name)));
    top_products.truncate(TOP_LIMIT);

    recent_sales.sort_by_key(|s| std::cmp::Reverse(numeric_id(&s.id)));
    recent_sales.truncate(TOP_LIMIT);

    let chart_data = chart
        .into_iter()
        .map(|(date, (sales_count, total_amount))| ChartPoint {
            date,
            sales_count,
            total_amount,
        })
        .collect();

    Consolidated {
        total_revenue: stats.total.revenue,
        total_sales: stats.total.count,
        stats,
        top_products,
        recent_sales,
        chart_data,
        stores,
    }
}

fn numeric_id(id: &str) -> i64 {
    id.parse().unwrap_or(0)
}

/// Fetch and normalize one store's dashboard stats. Failures are logged and
/// collapse to `None` so the store contributes zero to every aggregate.
pub async fn fetch_store_stats(
    client: &StoreClient,
    store: &StoreConfig,
    endpoint: Option<&str>,
) -> Option<StoreStats> {
    let endpoint = endpoint.unwrap_or(&store.stats_endpoint);
    match client.fetch_json(store, endpoint).await {
        Ok(raw) => Some(normalize(&raw)),
        Err(e) => {
            warn!(store = store.key.as_str(), error = %e, "failed to fetch store stats");
            None
        }
    }
}

/// Fan out the stats fetch to all active stores and consolidate.
pub async fn consolidated_billing(client: &StoreClient, endpoint: Option<&str>) -> Consolidated {
    let stores: Vec<&StoreConfig> = client.active_stores().collect();
    let datas = join_all(
        stores
            .iter()
            .map(|store| fetch_store_stats(client, store, endpoint)),
    )
    .await;

    let payloads = stores
        .into_iter()
        .zip(datas)
        .map(|(store, data)| StorePayload {
            key: store.key.clone(),
            name: store.name.clone(),
            data,
        })
        .collect();

    consolidate(payloads)
}
