mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "esgdash";

    const HEADER: &str = "CompanyID,CompanyName,Industry,Region,Year,Revenue,ProfitMargin,MarketCap,GrowthRate,ESG_Overall,ESG_Environmental,ESG_Social,ESG_Governance,CarbonEmissions,WaterUsage,EnergyConsumption";

    const ROWS: [&str; 4] = [
        "1,Acme,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300",
        "2,Beta,Retail,Asia,2020,200,0.2,800,0.05,70,60,75,80,10,5,90",
        "3,Gamma,Retail,Europe,2021,150,n/a,600,0.03,65,55,70,72,20,8,120",
        "3,Gamma,Retail,Europe,2021,150,n/a,600,0.03,65,55,70,72,20,8,120",
    ];

    fn write_dataset(dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join("company_esg_financial_dataset.csv");
        let mut content = vec![HEADER.to_string()];
        content.extend(ROWS.iter().map(|r| r.to_string()));
        fs::write(&path, content.join("\n") + "\n")?;
        Ok(path)
    }

    fn esgdash(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir).env("NO_COLOR", "1").arg("--no-progress");
        Ok(cmd)
    }

    #[test]
    fn test_output__when_no_subcommand() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.assert().failure().stderr(contains("Usage"));
        Ok(())
    }

    #[test]
    fn test_report__writes_html_and_prints_summary() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["report", "--output", "out.html"]);

        cmd.assert()
            .success()
            .stdout(contains("Shape: (3, 16)"))
            .stdout(contains("company_id"))
            .stdout(contains("Average ESG Score: 58.33"))
            .stdout(contains("Key Insights"))
            .stdout(contains("Industry differences exist (e.g., Retail vs Energy)."))
            .stdout(contains("Share regional best practices to raise ESG globally."))
            .stdout(contains("Report with 6 charts written to out.html"));

        let html = fs::read_to_string(dir.path().join("out.html"))?;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Correlation Heatmap"));
        Ok(())
    }

    #[test]
    fn test_report__uses_default_paths() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        esgdash(dir.path())?.arg("report").assert().success();

        assert!(dir.path().join("esg_report.html").exists());
        Ok(())
    }

    #[test]
    fn test_report__when_file_missing() -> TestResult {
        let dir = TempDir::new()?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--data", "absent.csv", "report"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(starts_with("Error: File not found"))
            .stderr(contains("absent.csv"));
        Ok(())
    }

    #[test]
    fn test_report__when_column_missing() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("partial.csv");
        fs::write(
            &path,
            "company_id,company_name,industry,region,year,revenue\n1,Acme,Energy,Europe,2020,100\n",
        )?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--data", "partial.csv", "report"]);

        cmd.assert()
            .failure()
            .stderr(contains("Missing column"))
            .stderr(contains("profit_margin"))
            .stderr(contains("partial.csv"));
        Ok(())
    }

    #[test]
    fn test_report__json_format() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--format", "json", "report"]);
        let output = cmd.output()?;
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["shape"]["rows"], 3);
        assert_eq!(value["load_stats"]["duplicate_rows"], 1);
        assert_eq!(value["insights"]["illustrative"], true);
        Ok(())
    }

    #[test]
    fn test_report__quiet_prints_nothing() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["-q", "report"]);

        let output = cmd.output()?;
        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        Ok(())
    }

    #[test]
    fn test_dashboard__default_selection() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["dashboard", "-o", "dash.html"]);

        cmd.assert()
            .success()
            .stdout(contains("Records: 3 of 3"))
            .stdout(contains("Top industry by ESG: Retail"));

        let html = fs::read_to_string(dir.path().join("dash.html"))?;
        assert!(html.contains("ESG &amp; Financial Performance Dashboard"));
        Ok(())
    }

    #[test]
    fn test_dashboard__filters_narrow_the_view() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args([
            "dashboard",
            "--industry",
            "Retail",
            "--region",
            "Europe",
            "--years",
            "2021",
            "--format",
            "minimal",
        ]);

        cmd.assert()
            .success()
            .stdout(starts_with("records 1"))
            .stdout(contains("mean_esg 65.00"));
        Ok(())
    }

    #[test]
    fn test_dashboard__empty_selection_is_not_an_error() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["dashboard", "--industry", "Mining", "-o", "dash.html"]);

        cmd.assert()
            .success()
            .stdout(contains("Records: 0 of 3"))
            .stdout(contains("No data for the current selection"));

        let html = fs::read_to_string(dir.path().join("dash.html"))?;
        assert!(html.contains("No data for the current selection"));
        Ok(())
    }

    #[test]
    fn test_dashboard__rust_log_shows_absent_filter_names() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.env("RUST_LOG", "warn")
            .args(["dashboard", "--industry", "Mining", "-o", "dash.html"]);

        cmd.assert()
            .success()
            .stderr(contains("Industry not present in the data: Mining"));
        Ok(())
    }

    #[test]
    fn test_dashboard__json_format() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--format", "json", "dashboard", "--region", "Asia"]);
        let output = cmd.output()?;
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["dashboard"]["summary"]["records"], 1);
        assert_eq!(value["dashboard"]["summary"]["mean_esg"], 70.0);
        assert_eq!(value["output"], "esg_dashboard.html");
        Ok(())
    }

    #[test]
    fn test_dashboard__invalid_years() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["dashboard", "--years", "2021..2019"]);

        cmd.assert()
            .failure()
            .stderr(contains("Error: Invalid argument"));
        Ok(())
    }

    #[test]
    fn test_config__file_in_current_directory() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;
        fs::write(
            dir.path().join(".esgdash.toml"),
            "report_path = \"from_config.html\"\noutput_format = \"minimal\"\n",
        )?;

        let mut cmd = esgdash(dir.path())?;
        cmd.arg("report");

        cmd.assert()
            .success()
            .stdout(starts_with("shape 3 16"))
            .stdout(contains("output from_config.html"));
        assert!(dir.path().join("from_config.html").exists());
        Ok(())
    }

    #[test]
    fn test_config__no_config_ignores_file() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;
        fs::write(
            dir.path().join(".esgdash.toml"),
            "output_format = \"minimal\"\n",
        )?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--no-config", "report"]);

        cmd.assert().success().stdout(contains("Shape: (3, 16)"));
        Ok(())
    }

    #[test]
    fn test_config__explicit_invalid_file() -> TestResult {
        let dir = TempDir::new()?;
        write_dataset(dir.path())?;
        fs::write(dir.path().join("bad.toml"), "head_rows = 500\n")?;

        let mut cmd = esgdash(dir.path())?;
        cmd.args(["--config", "bad.toml", "report"]);

        cmd.assert()
            .failure()
            .stderr(contains("Configuration error"));
        Ok(())
    }
}
