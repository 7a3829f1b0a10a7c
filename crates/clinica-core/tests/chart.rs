use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use clinica_core::chart::{TimelineBar, TimelineChart};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn bar(label: &str, group: &str, start: NaiveDateTime, end: NaiveDateTime) -> TimelineBar {
    TimelineBar {
        row_label: label.to_string(),
        start,
        end,
        group: group.to_string(),
        hover: vec![("ingreso".to_string(), "<b>1</b>".to_string())],
    }
}

fn sample_chart() -> TimelineChart {
    let mut chart = TimelineChart::new("Turnos </script> & más", "Hora", "Médico");
    chart.bars = vec![
        bar("A (slot 0)", "A", at(9, 0), at(9, 30)),
        bar("B (slot 0)", "B", at(9, 10), at(9, 5)),
        bar("A (slot 1)", "A", at(9, 10), at(9, 20)),
    ];
    chart
}

#[test]
fn figure_groups_bars_into_traces() {
    let figure = sample_chart().figure();
    let traces = figure["data"].as_array().unwrap();

    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["name"], "A");
    assert_eq!(traces[0]["orientation"], "h");
    assert_eq!(traces[0]["x"], serde_json::json!([1_800_000, 600_000]));
    // reversed bars are drawn with zero width
    assert_eq!(traces[1]["x"][0], 0);
    assert_eq!(figure["layout"]["xaxis"]["type"], "date");
    assert!(figure["layout"].get("legend").is_none());
}

#[test]
fn hover_text_is_escaped() {
    let figure = sample_chart().figure();
    let hover = figure["data"][0]["customdata"][0].as_str().unwrap();
    assert!(hover.contains("ingreso=&lt;b&gt;1&lt;/b&gt;"));
    assert!(hover.contains("inicio=2024-03-01 09:00:00"));
}

#[test]
fn html_embeds_figure_without_closing_the_script() {
    let html = sample_chart().to_html().unwrap();

    assert!(html.contains("https://cdn.plot.ly/plotly-"));
    assert!(html.contains("<title>Turnos &lt;/script&gt; &amp; más</title>"));
    assert_eq!(html.matches("</script>").count(), 2);
    assert!(html.contains("Plotly.newPlot(\"timeline\""));
}

#[test]
fn writes_html_and_figure_json() {
    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("timeline.html");
    let json_path = dir.path().join("timeline.json");

    let chart = sample_chart();
    chart.write_html(&html_path).unwrap();
    chart.write_figure_json(&json_path).unwrap();

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));

    let figure: serde_json::Value =
        serde_json::from_slice(&fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(figure, chart.figure());
}
