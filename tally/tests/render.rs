mod helpers;

use helpers::*;
use tally::render::{self, PLOTLY_CDN};
use tally::{Analysis, ChartConfig, Tally, TallyError, TraceStyle};

fn two_countries() -> Analysis {
    Tally::builder()
        .with_source(weekly(MEXICO))
        .with_source(weekly(PHILIPPINES))
        .spread(true)
        .build()
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn default_figure_has_values_and_trend_per_series() {
    let fig = render::figure(&two_countries(), &ChartConfig::default());
    let data = fig["data"].as_array().unwrap();
    // value + trend for each country, then the spread bar
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["type"], "bar");
    assert_eq!(data[0]["name"], MEXICO);
    assert_eq!(data[0]["x"][0], "2020-03-01");
    assert_eq!(data[1]["y"][0], serde_json::Value::Null);
    assert_eq!(data[4]["name"], "Mexico - Philippines");
    assert_eq!(fig["layout"]["title"]["text"], "<b>Time series</b>");
    assert!(fig["layout"]["annotations"].as_array().unwrap().is_empty());
}

#[test]
fn reference_lines_band_and_peak() {
    let analysis = Tally::builder()
        .with_source(weekly(MEXICO))
        .build()
        .unwrap()
        .run()
        .unwrap();
    let chart = ChartConfig {
        title: "Weekly cases".to_string(),
        subtitle: Some("Mexico, 2020".to_string()),
        style: TraceStyle::Area,
        show_mean: true,
        show_median: true,
        show_std_band: true,
        annotate_peak: true,
        ..ChartConfig::default()
    };
    let fig = render::figure(&analysis, &chart);
    let data = fig["data"].as_array().unwrap();
    // area, trend, mean, median, two band edges
    assert_eq!(data.len(), 6);
    assert_eq!(data[0]["fill"], "tozeroy");
    assert_eq!(data[2]["line"]["dash"], "dash");
    assert_eq!(data[3]["line"]["dash"], "dot");
    assert_eq!(data[5]["fill"], "tonexty");
    assert_eq!(data[2]["x"], serde_json::json!(["2020-03-01", "2020-05-01"]));

    let annotations = fig["layout"]["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["x"], "2020-04-01");
    assert_eq!(annotations[0]["y"], 11_607.0);
    assert!(annotations[0]["text"].as_str().unwrap().contains("Apr 2020<br>11,607"));
    assert_eq!(
        fig["layout"]["title"]["text"],
        "<b>Weekly cases</b><br><sup>Mexico, 2020</sup>"
    );
}

#[test]
fn reference_lines_take_series_colors_when_overlaid() {
    let chart = ChartConfig {
        show_mean: true,
        show_median: true,
        ..ChartConfig::default()
    };
    let fig = render::figure(&two_countries(), &chart);
    let data = fig["data"].as_array().unwrap();
    // per country: value, trend, mean, median
    let colors: Vec<&str> = [0, 2, 3, 4, 6, 7]
        .iter()
        .map(|&i| {
            let trace = &data[i];
            trace["marker"]["color"]
                .as_str()
                .or_else(|| trace["line"]["color"].as_str())
                .unwrap()
        })
        .collect();
    assert_eq!(colors[0], colors[1]);
    assert_eq!(colors[0], colors[2]);
    assert_eq!(colors[3], colors[4]);
    assert_eq!(colors[3], colors[5]);
    assert_ne!(colors[0], colors[3]);
}

#[test]
fn html_page_embeds_figure() {
    let chart = ChartConfig {
        title: "Cases </script> & deaths".to_string(),
        ..ChartConfig::default()
    };
    let page = render::html_page(&two_countries(), &chart).unwrap();
    assert!(page.contains(PLOTLY_CDN));
    assert!(page.contains("<title>Cases &lt;/script&gt; &amp; deaths</title>"));
    assert!(page.contains(r#"Plotly.newPlot("tally-chart""#));
    // the raw title inside the payload cannot end the script early
    assert_eq!(page.matches("</script>").count(), 2);
}

#[test]
fn writes_chart_and_report_files() {
    let dir = scratch_dir("render-write");
    let analysis = two_countries();
    let chart = dir.join("chart.html");
    let report = dir.join("report.json");

    render::write_html(&analysis, &ChartConfig::default(), &chart).unwrap();
    render::write_report(&analysis, &report).unwrap();

    assert!(std::fs::read_to_string(&chart).unwrap().starts_with("<!DOCTYPE html>"));
    let parsed: tally::AnalysisReport =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(parsed, analysis.report());
}

#[test]
fn unwritable_path_is_io_error() {
    let dir = scratch_dir("render-io");
    let target = dir.join("missing").join("chart.html");
    let err = render::write_html(&two_countries(), &ChartConfig::default(), &target).unwrap_err();
    assert!(matches!(err, TallyError::Io { .. }));
}

#[test]
fn outputs_are_all_or_nothing() {
    let dir = scratch_dir("render-outputs");
    let analysis = two_countries();
    let chart = dir.join("chart.html");

    let bad_report = dir.join("missing").join("report.json");
    let err = render::write_outputs(&analysis, &ChartConfig::default(), &chart, Some(&bad_report))
        .unwrap_err();
    assert!(matches!(err, TallyError::Io { ref path, .. } if path.ends_with("report.json")));
    assert!(!chart.exists());

    let report = dir.join("report.json");
    render::write_outputs(&analysis, &ChartConfig::default(), &chart, Some(&report)).unwrap();
    assert!(chart.exists());
    assert_eq!(
        render::report_json(&analysis).unwrap(),
        std::fs::read_to_string(&report).unwrap()
    );
}
