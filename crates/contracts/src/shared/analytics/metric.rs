//! Option lists for the analytics builder: metric, group-by dimension, time bucket.
//!
//! Each enum carries its wire key (`as_str`, identical to the serde form) and a
//! display label. Labels are in pt-BR, matching the rest of the UI.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::format::ValueFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSpec {
    Revenue,
    SalesCount,
    AvgTicket,
    AvgProductionTime,
    AvgDeliveryTime,
    TotalDiscount,
}

impl MetricSpec {
    /// Metrics offered in the builder's select list.
    pub const SELECTABLE: [MetricSpec; 5] = [
        MetricSpec::Revenue,
        MetricSpec::SalesCount,
        MetricSpec::AvgTicket,
        MetricSpec::AvgProductionTime,
        MetricSpec::AvgDeliveryTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricSpec::Revenue => "revenue",
            MetricSpec::SalesCount => "sales_count",
            MetricSpec::AvgTicket => "avg_ticket",
            MetricSpec::AvgProductionTime => "avg_production_time",
            MetricSpec::AvgDeliveryTime => "avg_delivery_time",
            MetricSpec::TotalDiscount => "total_discount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricSpec::Revenue => "Faturamento",
            MetricSpec::SalesCount => "Número de Vendas",
            MetricSpec::AvgTicket => "Ticket Médio",
            MetricSpec::AvgProductionTime => "Tempo Médio de Produção",
            MetricSpec::AvgDeliveryTime => "Tempo Médio de Entrega",
            MetricSpec::TotalDiscount => "Total de Descontos",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [
            MetricSpec::Revenue,
            MetricSpec::SalesCount,
            MetricSpec::AvgTicket,
            MetricSpec::AvgProductionTime,
            MetricSpec::AvgDeliveryTime,
            MetricSpec::TotalDiscount,
        ]
        .into_iter()
        .find(|m| m.as_str() == key)
    }

    /// Formatter used when the response carries no explicit format.
    pub fn display_format(&self) -> ValueFormat {
        ValueFormat::for_metric_key(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    Store,
    Channel,
    Product,
    Weekday,
    Hour,
}

impl GroupDimension {
    pub const ALL: [GroupDimension; 5] = [
        GroupDimension::Store,
        GroupDimension::Channel,
        GroupDimension::Product,
        GroupDimension::Weekday,
        GroupDimension::Hour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupDimension::Store => "store",
            GroupDimension::Channel => "channel",
            GroupDimension::Product => "product",
            GroupDimension::Weekday => "weekday",
            GroupDimension::Hour => "hour",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupDimension::Store => "Loja",
            GroupDimension::Channel => "Canal",
            GroupDimension::Product => "Produto",
            GroupDimension::Weekday => "Dia da Semana",
            GroupDimension::Hour => "Horário",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == key)
    }

    /// Row field holding the group label, e.g. `channel_name`.
    pub fn label_field(&self) -> String {
        format!("{}_name", self.as_str())
    }

    /// Human label for a raw bucket value of this dimension.
    pub fn display_value(&self, raw: &str) -> String {
        match self {
            GroupDimension::Weekday => whole_number(raw)
                .and_then(weekday_name)
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string()),
            GroupDimension::Hour => match whole_number(raw) {
                Some(n) => format!("{}h", n),
                None => raw.to_string(),
            },
            _ => raw.to_string(),
        }
    }
}

/// `"6"` and `"6.0"` parse; NaN, infinities and fractions do not.
fn whole_number(raw: &str) -> Option<i64> {
    let n = raw.trim().parse::<f64>().ok()?;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Day name for a day-of-week number where 0 is Sunday.
pub fn weekday_name(dow: i64) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Domingo",
        "Segunda",
        "Terça",
        "Quarta",
        "Quinta",
        "Sexta",
        "Sábado",
    ];
    usize::try_from(dow).ok().and_then(|i| NAMES.get(i).copied())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Hour,
        TimeBucket::Day,
        TimeBucket::Week,
        TimeBucket::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::Hour => "hour",
            TimeBucket::Day => "day",
            TimeBucket::Week => "week",
            TimeBucket::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Hour => "Por Hora",
            TimeBucket::Day => "Por Dia",
            TimeBucket::Week => "Por Semana",
            TimeBucket::Month => "Por Mês",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == key)
    }

    /// Axis label for a period string returned by the time-series endpoint.
    ///
    /// Unparseable periods are shown verbatim.
    pub fn period_label(&self, period: &str) -> String {
        let Some(at) = parse_period(period) else {
            return period.to_string();
        };
        match self {
            TimeBucket::Hour => at.format("%Y-%m-%d %H:00").to_string(),
            TimeBucket::Day => at.format("%Y-%m-%d").to_string(),
            TimeBucket::Week => {
                let week = at.date().iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            TimeBucket::Month => at.format("%Y-%m").to_string(),
        }
    }
}

/// Parses a period as a date (`YYYY-MM-DD`) or an ISO date-time with optional
/// fraction and offset.
pub fn parse_period(period: &str) -> Option<NaiveDateTime> {
    let trimmed = period.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Ordering key for top products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopProductOrder {
    #[default]
    Revenue,
    Quantity,
    Frequency,
}

impl TopProductOrder {
    pub const ALL: [TopProductOrder; 3] = [
        TopProductOrder::Revenue,
        TopProductOrder::Quantity,
        TopProductOrder::Frequency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TopProductOrder::Revenue => "Faturamento",
            TopProductOrder::Quantity => "Quantidade",
            TopProductOrder::Frequency => "Frequência",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopProductOrder::Revenue => "revenue",
            TopProductOrder::Quantity => "quantity",
            TopProductOrder::Frequency => "frequency",
        }
    }

    pub fn display_format(&self) -> ValueFormat {
        match self {
            TopProductOrder::Revenue => ValueFormat::Currency,
            _ => ValueFormat::Number,
        }
    }
}
