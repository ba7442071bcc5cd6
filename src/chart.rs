//! Chart Adapter
//!
//! Turns the summary's category totals or the monthly series into a chart
//! configuration and hands it to an opaque [`ChartSink`] (Chart.js in the
//! browser). At most one chart instance is alive at any time.

use serde::{Serialize, Serializer};
use std::str::FromStr;

use crate::aggregate::{category_totals, monthly_series};
use crate::model::{CategoryTotal, Expense};

const INCOME_COLOR: &str = "#22c55e";
const EXPENSE_COLOR: &str = "#ef4444";
const NET_COLOR: &str = "#60a5fa";

/// Which data the chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetMode {
    #[default]
    ByCategory,
    TypeOverTime,
    NetOverTime,
}

impl DatasetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetMode::ByCategory => "byCategory",
            DatasetMode::TypeOverTime => "typeOverTime",
            DatasetMode::NetOverTime => "netOverTime",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetMode::ByCategory => "By category",
            DatasetMode::TypeOverTime => "Income vs expense over time",
            DatasetMode::NetOverTime => "Net over time",
        }
    }

    /// Visual kind used when none is chosen
    pub fn default_kind(&self) -> ChartKind {
        match self {
            DatasetMode::ByCategory => ChartKind::Doughnut,
            DatasetMode::TypeOverTime | DatasetMode::NetOverTime => ChartKind::Line,
        }
    }

    pub const ALL: [DatasetMode; 3] = [
        DatasetMode::ByCategory,
        DatasetMode::TypeOverTime,
        DatasetMode::NetOverTime,
    ];
}

impl FromStr for DatasetMode {
    type Err = UnknownChartOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownChartOption(s.to_string()))
    }
}

/// Chart visual kind (Chart.js `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
    Line,
    PolarArea,
    Radar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::PolarArea => "polarArea",
            ChartKind::Radar => "radar",
        }
    }

    pub const ALL: [ChartKind; 6] = [
        ChartKind::Doughnut,
        ChartKind::Pie,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::PolarArea,
        ChartKind::Radar,
    ];
}

impl FromStr for ChartKind {
    type Err = UnknownChartOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownChartOption(s.to_string()))
    }
}

impl Serialize for ChartKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart option: {0}")]
pub struct UnknownChartOption(pub String);

/// Dataset mode plus an optional kind override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartSelection {
    pub mode: DatasetMode,
    pub kind: Option<ChartKind>,
}

impl ChartSelection {
    pub fn effective_kind(&self) -> ChartKind {
        self.kind.unwrap_or_else(|| self.mode.default_kind())
    }
}

/// Chart.js configuration object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// One color for the whole dataset, or one per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    One(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

impl ChartOptions {
    fn legend_bottom(responsive: Option<bool>) -> Self {
        Self {
            responsive,
            plugins: Plugins {
                legend: Legend {
                    position: "bottom".to_string(),
                },
            },
        }
    }
}

/// Stable color for the category at `index`
pub fn category_color(index: usize) -> String {
    format!("hsl({} 70% 55%)", (index * 47) % 360)
}

fn series(label: &str, data: Vec<f64>, color: &str) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
        background_color: Paint::One(format!("{}55", color)),
        border_color: Some(color.to_string()),
        fill: Some(false),
    }
}

/// Build the configuration for `selection` from the summary's category
/// totals and the loaded records.
pub fn build_config(
    selection: ChartSelection,
    by_category: &[CategoryTotal],
    entries: &[Expense],
) -> ChartConfig {
    let kind = selection.effective_kind();

    match selection.mode {
        DatasetMode::ByCategory => {
            let totals = category_totals(by_category);
            let colors = (0..totals.len()).map(category_color).collect();
            ChartConfig {
                kind,
                data: ChartData {
                    labels: totals.iter().map(|t| t.category.clone()).collect(),
                    datasets: vec![Dataset {
                        label: "Expenses".to_string(),
                        data: totals.iter().map(|t| t.total).collect(),
                        background_color: Paint::Each(colors),
                        border_color: None,
                        fill: None,
                    }],
                },
                options: ChartOptions::legend_bottom(None),
            }
        }
        DatasetMode::TypeOverTime | DatasetMode::NetOverTime => {
            let monthly = monthly_series(entries);
            let datasets = if selection.mode == DatasetMode::TypeOverTime {
                vec![
                    series("Income", monthly.incomes, INCOME_COLOR),
                    series("Expense", monthly.expenses, EXPENSE_COLOR),
                ]
            } else {
                vec![series("Net", monthly.net, NET_COLOR)]
            };
            ChartConfig {
                kind,
                data: ChartData {
                    labels: monthly.labels,
                    datasets,
                },
                options: ChartOptions::legend_bottom(Some(true)),
            }
        }
    }
}

/// Opaque chart renderer
pub trait ChartSink {
    type Handle;

    /// Construct a chart; `None` when there is nowhere to draw.
    fn create(&mut self, config: &ChartConfig) -> Option<Self::Handle>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the live chart instance and replaces it on every draw
pub struct ChartAdapter<C: ChartSink> {
    sink: C,
    current: Option<C::Handle>,
    last_config: Option<ChartConfig>,
}

impl<C: ChartSink> ChartAdapter<C> {
    pub fn new(sink: C) -> Self {
        Self {
            sink,
            current: None,
            last_config: None,
        }
    }

    /// Discard the previous chart, then construct one from `config`.
    pub fn draw(&mut self, config: ChartConfig) -> bool {
        self.clear();

        self.current = self.sink.create(&config);
        let drawn = self.current.is_some();
        if drawn {
            tracing::debug!(
                kind = config.kind.as_str(),
                labels = config.data.labels.len(),
                "Chart drawn"
            );
        }
        self.last_config = Some(config);
        drawn
    }

    pub fn render(
        &mut self,
        selection: ChartSelection,
        by_category: &[CategoryTotal],
        entries: &[Expense],
    ) -> bool {
        self.draw(build_config(selection, by_category, entries))
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            self.sink.destroy(handle);
        }
    }

    /// 0 or 1
    pub fn live_instances(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn last_config(&self) -> Option<&ChartConfig> {
        self.last_config.as_ref()
    }

    pub fn sink(&self) -> &C {
        &self.sink
    }
}

/// Sink that draws nothing, for hosts without a display
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChart;

impl ChartSink for NullChart {
    type Handle = ();

    fn create(&mut self, _config: &ChartConfig) -> Option<()> {
        None
    }

    fn destroy(&mut self, _handle: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryType, ExpenseId};

    #[derive(Default)]
    struct CountingSink {
        next_id: u32,
        alive: Vec<u32>,
        created: Vec<ChartConfig>,
    }

    impl ChartSink for CountingSink {
        type Handle = u32;

        fn create(&mut self, config: &ChartConfig) -> Option<u32> {
            self.next_id += 1;
            self.alive.push(self.next_id);
            self.created.push(config.clone());
            Some(self.next_id)
        }

        fn destroy(&mut self, handle: u32) {
            self.alive.retain(|h| *h != handle);
        }
    }

    fn sample_entries() -> Vec<Expense> {
        vec![
            Expense {
                id: ExpenseId::from(1),
                title: "Coffee".to_string(),
                amount: 4.5,
                date: "2024-03-02".to_string(),
                category: "Food".to_string(),
                entry_type: EntryType::Expense,
            },
            Expense {
                id: ExpenseId::from(2),
                title: "Salary".to_string(),
                amount: 2000.0,
                date: "2024-03-01".to_string(),
                category: "Work".to_string(),
                entry_type: EntryType::Income,
            },
        ]
    }

    fn sample_totals() -> Vec<CategoryTotal> {
        vec![
            CategoryTotal { category: "Food".to_string(), total: 4.5 },
            CategoryTotal { category: "Rent".to_string(), total: 900.0 },
        ]
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("netOverTime".parse::<DatasetMode>(), Ok(DatasetMode::NetOverTime));
        assert_eq!("polarArea".parse::<ChartKind>(), Ok(ChartKind::PolarArea));
        assert!("scatter".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_default_kinds() {
        let by_category = ChartSelection::default();
        assert_eq!(by_category.effective_kind(), ChartKind::Doughnut);

        let net = ChartSelection { mode: DatasetMode::NetOverTime, kind: None };
        assert_eq!(net.effective_kind(), ChartKind::Line);

        let overridden = ChartSelection { mode: DatasetMode::ByCategory, kind: Some(ChartKind::Bar) };
        assert_eq!(overridden.effective_kind(), ChartKind::Bar);
    }

    #[test]
    fn test_by_category_config() {
        let config = build_config(ChartSelection::default(), &sample_totals(), &[]);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["data"]["labels"], serde_json::json!(["Food", "Rent"]));
        assert_eq!(json["data"]["datasets"][0]["data"], serde_json::json!([4.5, 900.0]));
        assert_eq!(
            json["data"]["datasets"][0]["backgroundColor"],
            serde_json::json!(["hsl(0 70% 55%)", "hsl(47 70% 55%)"])
        );
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "bottom");
        assert!(json["options"].get("responsive").is_none());
    }

    #[test]
    fn test_type_over_time_config() {
        let selection = ChartSelection { mode: DatasetMode::TypeOverTime, kind: None };
        let config = build_config(selection, &[], &sample_entries());

        assert_eq!(config.data.labels, vec!["2024-03"]);
        assert_eq!(config.data.datasets.len(), 2);
        assert_eq!(config.data.datasets[0].data, vec![2000.0]);
        assert_eq!(config.data.datasets[1].data, vec![4.5]);
        assert_eq!(config.data.datasets[0].border_color.as_deref(), Some("#22c55e"));
        assert_eq!(config.data.datasets[0].background_color, Paint::One("#22c55e55".to_string()));
    }

    #[test]
    fn test_net_over_time_config() {
        let selection = ChartSelection { mode: DatasetMode::NetOverTime, kind: Some(ChartKind::Bar) };
        let config = build_config(selection, &[], &sample_entries());

        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(config.data.datasets[0].label, "Net");
        assert_eq!(config.data.datasets[0].data, vec![1995.5]);
    }

    #[test]
    fn test_colors_stable_across_renders() {
        let first = build_config(ChartSelection::default(), &sample_totals(), &[]);
        let second = build_config(ChartSelection::default(), &sample_totals(), &[]);
        assert_eq!(first.data.datasets[0].background_color, second.data.datasets[0].background_color);
        assert_eq!(category_color(8), "hsl(16 70% 55%)");
    }

    #[test]
    fn test_switching_mode_keeps_one_instance() {
        let mut adapter = ChartAdapter::new(CountingSink::default());

        adapter.render(ChartSelection::default(), &sample_totals(), &sample_entries());
        assert_eq!(adapter.sink().alive.len(), 1);

        let net = ChartSelection { mode: DatasetMode::NetOverTime, kind: None };
        adapter.render(net, &sample_totals(), &sample_entries());

        assert_eq!(adapter.sink().alive, vec![2]);
        assert_eq!(adapter.live_instances(), 1);
        assert_eq!(adapter.last_config().unwrap().data.datasets[0].label, "Net");
    }

    #[test]
    fn test_missing_canvas_leaves_no_instance() {
        let mut adapter = ChartAdapter::new(NullChart);
        assert!(!adapter.render(ChartSelection::default(), &sample_totals(), &[]));
        assert_eq!(adapter.live_instances(), 0);
        assert!(adapter.last_config().is_some());
    }
}
