#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use talleres::models::{Level, RowId, RowSet, Shift, Workshop};

pub const ADMIN_PW: &str = "admin-secret";
pub const USER_PW: &str = "usuario-secret";

pub const SAMPLE_CSV: &str = "\
No,CCT,Nivel,Turno,Plantel,Direccion,Sesiones,Taller,Fecha
1,15EPR0001A,PRIMARIA,MATUTINO,Escuela Benito Juarez,Av. Reforma 10,3,Robotica,26/12/2025
2,15EJN0002B,PREESCOLAR,VESPERTINO,Jardin Amanecer,Calle Sol 4,2,Lectura,05/01/2025
5,15EPR0003C,PRIMARIA,MATUTINO,Escuela Hidalgo,Calle Luna 8,5,Ajedrez,10/02/2025
";

/// Binary under test, with both account secrets in the environment.
pub fn tal() -> Command {
    let mut cmd = cargo_bin_cmd!("talleres");
    cmd.env("TALLERES_ADMIN_PASSWORD", ADMIN_PW)
        .env("TALLERES_USER_PASSWORD", USER_PW)
        .env_remove("TALLERES_PASSWORD");
    cmd
}

/// Unique csv store directory and config path inside the system temp dir.
/// Both are removed if left over from a previous run.
pub fn setup_test_store(name: &str) -> (String, String) {
    let mut dir: PathBuf = env::temp_dir();
    dir.push(format!("{name}_talleres_store"));
    fs::remove_dir_all(&dir).ok();

    let mut cfg: PathBuf = env::temp_dir();
    cfg.push(format!("{name}_talleres.conf"));
    fs::remove_file(&cfg).ok();

    (
        dir.to_string_lossy().to_string(),
        cfg.to_string_lossy().to_string(),
    )
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_out.{ext}"));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Global options pointing the binary at the test store, logged in as
/// `user`.
pub fn base_args(store: &str, cfg: &str, user: &str) -> Vec<String> {
    let password = if user == "admin" { ADMIN_PW } else { USER_PW };
    [
        "--config", cfg, "--backend", "csv", "--store", store, "--user", user, "--password",
        password,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Initialize the store and seed the worksheet with `SAMPLE_CSV`.
pub fn init_store_with_data(name: &str) -> (String, String) {
    let (store, cfg) = setup_test_store(name);
    let seed = temp_out(&format!("{name}_seed"), "csv");
    fs::write(&seed, SAMPLE_CSV).expect("write seed csv");

    tal()
        .args(["--config", &cfg, "--backend", "csv", "--store", &store, "--test"])
        .args(["init", "--import", &seed])
        .assert()
        .success();

    (store, cfg)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn workshop(id: Option<u64>, code: &str, facility: &str) -> Workshop {
    Workshop {
        id: id.map(RowId::Number),
        code: code.to_string(),
        facility_name: facility.to_string(),
        ..Workshop::default()
    }
}

/// Three keyed rows, the typed counterpart of `SAMPLE_CSV`.
pub fn sample_rows() -> RowSet {
    let mut a = workshop(Some(1), "15EPR0001A", "Escuela Benito Juarez");
    a.level = Some(Level::Primaria);
    a.shift = Some(Shift::Matutino);
    a.session_count = Some(3);
    a.workshop_name = "Robotica".into();
    a.date = Some(date(2025, 12, 26));

    let mut b = workshop(Some(2), "15EJN0002B", "Jardin Amanecer");
    b.level = Some(Level::Preescolar);
    b.shift = Some(Shift::Vespertino);
    b.session_count = Some(2);
    b.workshop_name = "Lectura".into();
    b.date = Some(date(2025, 1, 5));

    let mut c = workshop(Some(5), "15EPR0003C", "Escuela Hidalgo");
    c.level = Some(Level::Primaria);
    c.shift = Some(Shift::Matutino);
    c.session_count = Some(5);
    c.workshop_name = "Ajedrez".into();
    c.date = Some(date(2025, 2, 10));

    RowSet::from_rows(vec![a, b, c])
}
