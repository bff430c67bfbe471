use anyhow::Result;
use co2_dashboard::app::build_dashboard;
use co2_dashboard::core::session::run_session;
use co2_dashboard::{Controls, Event, Outcome, TomlConfig};
use tempfile::TempDir;

const CSV: &str = "\
,Country Name,Country Code,Year,CO2 Per Capita (metric tons)
0,Qatar,QAT,2008,46.5
1,Qatar,QAT,2009,41.5
2,Kuwait,KWT,2008,30.0
3,Kuwait,KWT,2011,32.0
4,France,FRA,2008,6.0
5,France,FRA,2010,5.0
6,Chad,TCD,2009,
7,Chad,TCD,1960,0.01
";

fn write_config(temp_dir: &TempDir, formats: &str, bundle: bool) -> Result<TomlConfig> {
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");
    let dataset_path = format!("{}/co2.csv", temp_path);
    std::fs::write(&dataset_path, CSV)?;

    let config_content = format!(
        r#"
[dashboard]
name = "integration"

[dataset]
source = "{}"

[controls]
start_year = 2008
end_year = 2011
country_count = 5

[output]
output_path = "{}/charts"
formats = [{}]
bundle = {}
"#,
        dataset_path, temp_path, formats, bundle
    );

    let config_path = format!("{}/dashboard.toml", temp_path);
    std::fs::write(&config_path, config_content)?;
    Ok(TomlConfig::from_file(&config_path)?)
}

#[tokio::test]
async fn test_bar_chart_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_config(&temp_dir, r#""html", "csv""#, false)?;
    let mut dashboard =
        build_dashboard(&config, config.initial_controls()?, config.timeout(), false).await?;

    let Outcome::TopEmitters { ranking, written } =
        dashboard.handle(Event::ShowTopEmitters).await?
    else {
        panic!("expected a bar chart");
    };

    let names: Vec<&str> = ranking.iter().map(|m| m.country_name.as_str()).collect();
    assert_eq!(names, vec!["Qatar", "Kuwait", "France"]);
    assert_eq!(ranking[0].mean_co2_per_capita, 44.0);
    assert_eq!(written.len(), 2);

    let html_path = temp_dir
        .path()
        .join("charts")
        .join("top_emitters_2008_2011_top5.html");
    let html = std::fs::read_to_string(html_path)?;
    assert!(html.contains("Top 5 CO2 per-capita emitters (2008-2011)"));
    assert!(html.contains("Plotly.newPlot"));

    let csv_path = temp_dir
        .path()
        .join("charts")
        .join("top_emitters_2008_2011_top5.csv");
    let csv = std::fs::read_to_string(csv_path)?;
    assert_eq!(csv.lines().count(), 4);
    Ok(())
}

#[tokio::test]
async fn test_map_bundle_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_config(&temp_dir, r#""html", "json", "csv""#, true)?;
    let mut dashboard =
        build_dashboard(&config, Controls::default(), config.timeout(), false).await?;

    let Outcome::EmissionsMap { rows, frames, written } =
        dashboard.handle(Event::ShowEmissionsMap).await?
    else {
        panic!("expected a map");
    };

    assert_eq!(rows, 8);
    assert_eq!(frames, 5);
    assert_eq!(written.len(), 1);

    let zip_path = temp_dir.path().join("charts").join("emissions_map.zip");
    let archive = zip::ZipArchive::new(std::fs::File::open(zip_path)?)?;
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(
        names,
        vec!["emissions_map.csv", "emissions_map.html", "emissions_map.json"]
    );
    Ok(())
}

#[tokio::test]
async fn test_interactive_session() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_config(&temp_dir, r#""json""#, false)?;
    let mut dashboard =
        build_dashboard(&config, config.initial_controls()?, config.timeout(), false).await?;

    let input = "summary\nstart 2010\ntop 99\nbar\nfly\nquit\nbar\n";
    let mut output: Vec<u8> = Vec::new();
    run_session(&mut dashboard, input.as_bytes(), &mut output).await?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("Dataset loaded: 8 rows, 5 columns, 4 countries"));
    assert!(output.contains("Years 2010-2011, top 5 countries"));
    assert!(output.contains("country_count must be between 5 and 20, got 99"));
    assert!(output.contains("Unknown command: fly"));

    // 2010-2011 只剩 Kuwait 與 France
    assert!(output.contains("  1  Kuwait"));
    assert!(output.contains("  2  France"));
    assert!(temp_dir
        .path()
        .join("charts")
        .join("top_emitters_2010_2011_top5.json")
        .exists());

    assert_eq!(dashboard.controls().start_year(), 2010);
    Ok(())
}

#[tokio::test]
async fn test_missing_dataset_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_config(&temp_dir, r#""html""#, false)?;
    std::fs::remove_file(temp_dir.path().join("co2.csv"))?;

    let result = build_dashboard(&config, Controls::default(), config.timeout(), false).await;
    let err = result.err().expect("dataset should be missing");
    assert_eq!(err.exit_code(), 3);
    Ok(())
}
