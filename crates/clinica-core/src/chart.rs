//! Interactive timeline charts, written as standalone plotly.js HTML pages.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::error::Result;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const AXIS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One horizontal bar on a timeline row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub row_label: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Legend group (trace) the bar belongs to.
    pub group: String,
    /// Hover lines as (label, value) pairs.
    pub hover: Vec<(String, String)>,
}

impl TimelineBar {
    fn duration_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds().max(0)
    }

    fn hover_text(&self) -> String {
        let mut lines = vec![
            escape_html(&self.row_label),
            format!("inicio={}", self.start.format(AXIS_TIME_FORMAT)),
            format!("fin={}", self.end.format(AXIS_TIME_FORMAT)),
        ];
        for (label, value) in &self.hover {
            lines.push(format!("{}={}", escape_html(label), escape_html(value)));
        }
        lines.join("<br>")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: Option<String>,
    pub height: Option<u32>,
    pub bars: Vec<TimelineBar>,
}

impl TimelineChart {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            legend_title: None,
            height: None,
            bars: Vec::new(),
        }
    }

    /// Groups in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for bar in &self.bars {
            if !groups.contains(&bar.group.as_str()) {
                groups.push(bar.group.as_str());
            }
        }
        groups
    }

    /// The plotly figure (`data` + `layout`).
    pub fn figure(&self) -> Value {
        let traces: Vec<Value> = self
            .groups()
            .into_iter()
            .map(|group| {
                let bars: Vec<&TimelineBar> =
                    self.bars.iter().filter(|bar| bar.group == group).collect();
                json!({
                    "type": "bar",
                    "orientation": "h",
                    "name": group,
                    "showlegend": self.legend_title.is_some(),
                    "base": bars
                        .iter()
                        .map(|bar| bar.start.format(AXIS_TIME_FORMAT).to_string())
                        .collect::<Vec<_>>(),
                    "x": bars.iter().map(|bar| bar.duration_millis()).collect::<Vec<_>>(),
                    "y": bars.iter().map(|bar| bar.row_label.as_str()).collect::<Vec<_>>(),
                    "customdata": bars.iter().map(|bar| bar.hover_text()).collect::<Vec<_>>(),
                    "hovertemplate": "%{customdata}<extra></extra>",
                })
            })
            .collect();

        let mut layout = json!({
            "title": { "text": self.title },
            "barmode": "overlay",
            "xaxis": { "type": "date", "title": { "text": self.x_title } },
            "yaxis": { "autorange": "reversed", "title": { "text": self.y_title } },
        });
        if let Some(legend_title) = &self.legend_title {
            layout["legend"] = json!({ "title": { "text": legend_title } });
        }
        if let Some(height) = self.height {
            layout["height"] = json!(height);
        }

        json!({ "data": traces, "layout": layout })
    }

    pub fn to_html(&self) -> Result<String> {
        let figure = serde_json::to_string(&self.figure())?;
        // keep the payload from closing the surrounding <script> element
        let figure = figure.replace("</", "<\\/");
        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="timeline" style="width:100%;"></div>
<script>
const figure = {figure};
Plotly.newPlot("timeline", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
            title = escape_html(&self.title),
            cdn = PLOTLY_CDN,
            figure = figure,
        ))
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_html()?)?;
        Ok(())
    }

    pub fn write_figure_json(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_vec_pretty(&self.figure())?)?;
        Ok(())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
