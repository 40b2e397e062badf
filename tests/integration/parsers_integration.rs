//! File-level tests for the local telemetry converters

use pretty_assertions::assert_eq;

use crate::common::logging::{init_test_logging, log_test_step};
use stellar_telemetry::parsers::{read_power_dir, read_top_file, read_vnstat_file, write_power_csv, Granularity};
use stellar_telemetry::report::{build_report, read_daily_network_power, read_rapl_csv, DateWindow, ReportParams};

const TOP_CAPTURE: &str = "\
top - 00:00:01 up 3 days,  1:00,  0 users,  load average: 1.00, 0.90, 0.80
Tasks: 100 total,   1 running,  99 sleeping,   0 stopped,   0 zombie
%Cpu(s): 10.0 us,  2.0 sy,  0.0 ni, 88.0 id,  0.0 wa,  0.0 hi,  0.0 si,  0.0 st
MiB Mem :   7900.0 total,    500.0 free,   3000.0 used,   4400.0 buff/cache
MiB Swap:      0.0 total,      0.0 free,      0.0 used.   4600.0 avail Mem

    PID USER      PR  NI    VIRT    RES    SHR S  %CPU  %MEM     TIME+ COMMAND
    900 stellar   20   0 1000000 500000  10000 S  40.0   6.3   1:00.00 stellar-core
";

#[test]
fn test_top_file_date_comes_from_file_name() {
    init_test_logging();
    log_test_step("Reading a dated top capture");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2021-05-23.txt");
    std::fs::write(&path, TOP_CAPTURE).unwrap();

    let samples = read_top_file(&path).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].timestamp, "2021-05-23 00:00:01");
    assert_eq!(samples[0].stellar_cpu.as_deref(), Some("40.0"));
    assert_eq!(samples[0].pgsql_cpu, None);
}

#[test]
fn test_power_dir_is_read_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("b.csv"),
        "timestamp;duration;CORE;CPU;DRAM\n2021-05-14 01:00:00;2;4;8;2\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("a.csv"),
        "timestamp;duration;CORE;CPU;DRAM\n2021-05-14 00:00:00;2;2;6;2\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a dump").unwrap();

    let readings = read_power_dir(dir.path()).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].timestamp, "2021-05-14 00:00:00");
    assert_eq!(readings[0].cpu, Some(3.0));
    assert_eq!(readings[1].cpu, Some(4.0));
}

#[test]
fn test_vnstat_file_round_through_report() {
    init_test_logging();
    log_test_step("vnstat + power dumps feed the report tables");

    let dir = tempfile::tempdir().unwrap();

    let vnstat = dir.path().join("vnstat.json");
    std::fs::write(
        &vnstat,
        r#"{"interfaces":[{"traffic":{"day":[
            {"date":{"year":2021,"month":5,"day":14},"rx":24000000000,"tx":24000000000},
            {"date":{"year":2021,"month":5,"day":15},"rx":48000000000,"tx":48000000000}
        ]}}]}"#,
    )
    .unwrap();
    let traffic = read_vnstat_file(&vnstat, Granularity::Day).unwrap();
    let network_csv = dir.path().join("network-traffic.csv");
    stellar_telemetry::parsers::write_traffic_csv(&traffic, std::fs::File::create(&network_csv).unwrap()).unwrap();

    let dumps = dir.path().join("dumps");
    std::fs::create_dir(&dumps).unwrap();
    std::fs::write(
        dumps.join("session.csv"),
        "timestamp;duration;CORE;CPU;DRAM\n2021-05-14 00:00:00;1;5;10;2\n2021-05-14 00:01:00;1;5;20;4\n",
    )
    .unwrap();
    let rapl_csv = dir.path().join("cpu-ram.csv");
    write_power_csv(&read_power_dir(&dumps).unwrap(), std::fs::File::create(&rapl_csv).unwrap()).unwrap();

    let rapl = read_rapl_csv(&rapl_csv, &DateWindow::default()).unwrap();
    assert_eq!(rapl.cpu, vec![10.0, 20.0]);
    assert_eq!(rapl.ram, vec![2.0, 4.0]);

    // 24 GB/day is 60 W, 48 GB/day is 120 W
    let network = read_daily_network_power(&network_csv, &DateWindow::default()).unwrap();
    assert_eq!(network.len(), 2);
    assert!((network[0] - 60.0).abs() < 1e-9);
    assert!((network[1] - 120.0).abs() < 1e-9);

    let report = build_report(&rapl, &network, &ReportParams::default()).unwrap();
    assert!(report.contains("Mean           & 15.000 W & 3.000 W \\\\"));
    assert!(report.contains("\\bottomrule"));
    assert_eq!(report.matches("\\toprule").count(), 3);
}
