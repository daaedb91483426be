use std::fs;

use crxs_core::constants::MASS_PROTON;
use crxs_core::CrxsError;
use crxs_tab::{convert_file, parse_rows, render_table, write_csv, TableHeader, TableRow};
use tempfile::tempdir;

const NA49_SAMPLE: &str = "\
# p_LAB pT xF CS stat sys scale
158.0 0.1 0.0 1.42 3.1 4.0 6.5

158.0 0.3 -0.1 0.873 2.5 4.0 6.5
158.0 0.5 0.2 0.21 4.8 4.0 6.5
";

fn header() -> TableHeader {
    TableHeader {
        experiment: "NA49, DOI:10.1140/epjc/s10052-013-2364-3".to_string(),
        reaction: "p + C -> pbar + X".to_string(),
        table: 1,
    }
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let rows = parse_rows(NA49_SAMPLE).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1],
        TableRow {
            p_lab: 158.0,
            p_t: 0.3,
            x_f: -0.1,
            cs: 0.873,
            stat_pct: 2.5,
            sys_pct: 4.0,
            scale_pct: 6.5,
        }
    );
}

#[test]
fn derived_columns_follow_fixed_target_kinematics() {
    let rows = parse_rows(NA49_SAMPLE).unwrap();
    let converted = rows[1].convert().unwrap();
    let energy = 158.0f64.hypot(MASS_PROTON);
    let s = 2.0 * MASS_PROTON * MASS_PROTON + 2.0 * MASS_PROTON * energy;
    assert!((converted.sqrt_s - s.sqrt()).abs() < 1e-12);
    assert!(converted.x_r < 0.0, "x_R carries the sign of x_F");
    assert!(converted.x_r > -1.0);
    assert!((converted.stat - 0.873 * 0.025).abs() < 1e-15);
    assert!((converted.sys - 0.873 * 0.04).abs() < 1e-15);
    assert!((converted.scale - 0.065).abs() < 1e-15);

    let central = rows[0].convert().unwrap();
    assert!(central.x_r > 0.0, "x_F = 0 counts as positive");
}

#[test]
fn output_has_one_line_per_row_and_fixed_width_fields() {
    let rows: Vec<_> = parse_rows(NA49_SAMPLE)
        .unwrap()
        .iter()
        .map(|row| row.convert().unwrap())
        .collect();
    let text = render_table(&header(), &rows);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# NA49, DOI:10.1140/epjc/s10052-013-2364-3");
    assert_eq!(lines[1], "# p + C -> pbar + X");
    assert!(lines.contains(&"# Tab 1"));
    assert!(lines.contains(&"#End Tab 1"));

    let data: Vec<&str> = lines.iter().copied().filter(|line| !line.starts_with('#')).collect();
    assert_eq!(data.len(), rows.len());
    for line in data {
        assert!(line.starts_with("   ") && !line.starts_with("    "), "{line:?}");
        let body = &line[3..];
        // Nine fields padded to at least 20 characters, the last one included.
        assert!(body.len() >= 9 * 20 + 8);
        assert_eq!(body.split_whitespace().count(), 9);
    }

    let caption = lines.iter().find(|line| line.starts_with("#*")).unwrap();
    assert!(caption.starts_with("#*  sqrt(s)"));
    assert!(caption.ends_with(&format!("{:<20}", "err_scale")));
    assert_eq!(caption.len(), 4 + 9 * 20 + 8);
}

#[test]
fn malformed_rows_report_their_line() {
    let err = parse_rows("158.0 0.1 0.0 1.42 3.1 4.0\n").unwrap_err();
    assert!(matches!(err, CrxsError::Table(_)));
    assert_eq!(err.code(), "column-count");
    assert_eq!(err.info().context["line"], "1");

    let err = parse_rows("# header\n158.0 0.1 abc 1.42 3.1 4.0 6.5\n").unwrap_err();
    assert_eq!(err.code(), "parse-number");
    assert_eq!(err.info().context["line"], "2");
}

#[test]
fn convert_file_writes_the_annotated_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("na49.txt");
    let output = dir.path().join("converted_na49.txt");
    fs::write(&input, NA49_SAMPLE).unwrap();

    let converted = convert_file(&input, &output, &header()).unwrap();
    assert_eq!(converted.len(), 3);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, render_table(&header(), &converted));
}

#[test]
fn unphysical_rows_name_the_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.txt");
    fs::write(&input, "158.0 0.1 0.0 1.0 1.0 1.0 1.0\n158.0 0.1 1.5 1.0 1.0 1.0 1.0\n").unwrap();
    let err = convert_file(&input, &dir.path().join("out.txt"), &header()).unwrap_err();
    assert_eq!(err.code(), "invalid-kinematics");
    assert_eq!(err.info().context["row"], "2");
}

#[test]
fn missing_input_is_a_table_error() {
    let dir = tempdir().unwrap();
    let err = convert_file(&dir.path().join("absent.txt"), &dir.path().join("out.txt"), &header())
        .unwrap_err();
    assert_eq!(err.code(), "table-read");
}

#[test]
fn csv_export_has_a_header_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.csv");
    let rows: Vec<_> = parse_rows(NA49_SAMPLE)
        .unwrap()
        .iter()
        .map(|row| row.convert().unwrap())
        .collect();
    write_csv(&path, &rows).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("sqrt_s,p_t,x_r,x_f,cs,stat,sys,scale"));
    assert_eq!(lines.count(), 3);
}
