mod common;
use common::{date, sample_rows, setup_test_store, workshop};
use std::fs;
use std::time::Duration;
use talleres::core::filter::{View, filter};
use talleres::core::loader::load;
use talleres::core::save::{FormatWarningPolicy, SaveLogic, SaveOptions};
use talleres::core::serialize::{serialize, to_sheet};
use talleres::core::session::{Credentials, Session};
use talleres::errors::{AppError, AppResult};
use talleres::models::{Column, RowId};
use talleres::store::{
    AuditEntry, CachedStore, CsvStore, Sheet, SheetStore, SheetValue, SqliteStore,
};

const SHEET: &str = "Hoja 1";

fn headers() -> Vec<String> {
    Column::ALL.iter().map(|c| c.header().to_string()).collect()
}

fn admin() -> Session {
    let creds = Credentials::new(Some("a".into()), Some("u".into()));
    Session::login(&creds, "admin", "a").expect("admin login")
}

/// Store whose writes are rejected while `failing` is set.
struct FlakyStore {
    inner: SqliteStore,
    failing: bool,
}

impl FlakyStore {
    fn new(failing: bool) -> Self {
        Self {
            inner: seeded_sqlite(),
            failing,
        }
    }
}

impl SheetStore for FlakyStore {
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet> {
        self.inner.read(worksheet, columns)
    }

    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()> {
        if self.failing {
            return Err(AppError::Connection("update rejected".into()));
        }
        self.inner.write(worksheet, sheet)
    }

    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.inner.append_audit(operation, target, message)
    }

    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>> {
        self.inner.audit_entries()
    }
}

fn seeded_sqlite() -> SqliteStore {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    let wire = serialize(&sample_rows()).expect("serialize sample");
    store.write(SHEET, &to_sheet(&wire)).expect("seed worksheet");
    store
}

#[test]
fn test_load_reads_typed_rows_in_order() {
    let mut store = seeded_sqlite();
    let full = load(&mut store, SHEET).expect("load");

    assert_eq!(full.len(), 3);
    let first = &full.rows()[0];
    assert_eq!(first.id, Some(RowId::Number(1)));
    assert_eq!(first.date, Some(date(2025, 12, 26)));
    assert_eq!(first.session_count, Some(3));
    assert_eq!(full.rows()[2].id, Some(RowId::Number(5)));
}

#[test]
fn test_load_normalises_cells() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    let row = vec![
        SheetValue::Real(4.0),
        SheetValue::Text("15EPR0009Z".into()),
        SheetValue::Text("primaria".into()),
        SheetValue::Text("NaN".into()),
        SheetValue::Text("Escuela".into()),
        SheetValue::Empty,
        SheetValue::Text("dos".into()),
        SheetValue::Real(123.0),
        SheetValue::Text("03/04/2025".into()),
    ];
    let serial_row = vec![
        SheetValue::Integer(5),
        SheetValue::Text("X".into()),
        SheetValue::Empty,
        SheetValue::Empty,
        SheetValue::Empty,
        SheetValue::Empty,
        SheetValue::Integer(2),
        SheetValue::Text("Pintura".into()),
        SheetValue::Integer(45658),
    ];
    store
        .write(
            SHEET,
            &Sheet {
                headers: headers(),
                rows: vec![row, serial_row],
            },
        )
        .expect("write");

    let full = load(&mut store, SHEET).expect("load");
    let r = &full.rows()[0];
    assert_eq!(r.id, Some(RowId::Number(4)));
    assert_eq!(r.level.as_ref().map(|l| l.as_str()), Some("PRIMARIA"));
    assert_eq!(r.shift, None);
    assert_eq!(r.session_count, None);
    // numeric workshop names never survive as numbers
    assert_eq!(r.workshop_name, "");
    // day first: 3 April, not 4 March
    assert_eq!(r.date, Some(date(2025, 4, 3)));

    let s = &full.rows()[1];
    assert_eq!(s.session_count, Some(2));
    assert_eq!(s.date, Some(date(2025, 1, 1)));
}

#[test]
fn test_load_rejects_unexpected_layout() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    let mut bad = headers();
    bad.swap(0, 1);
    store
        .write(
            SHEET,
            &Sheet {
                headers: bad,
                rows: vec![],
            },
        )
        .expect("write");

    let err = load(&mut store, SHEET).expect_err("layout error");
    assert!(matches!(err, AppError::Connection(_)));
}

#[test]
fn test_load_missing_worksheet_is_connection_error() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    let err = load(&mut store, "Nope").expect_err("missing worksheet");
    assert!(matches!(err, AppError::Connection(_)));
}

#[test]
fn test_load_keeps_only_first_nine_columns() {
    let (dir, _) = setup_test_store("extra_columns");
    let mut store = CsvStore::open(&dir).expect("open csv store");
    fs::write(
        store.worksheet_path(SHEET),
        "No,CCT,Nivel,Turno,Plantel,Direccion,Sesiones,Taller,Fecha,Notas\n\
         1,A,PRIMARIA,MIXTO,P,D,1,T,01/02/2025,ignored\n",
    )
    .expect("write worksheet");

    let full = load(&mut store, SHEET).expect("load");
    assert_eq!(full.len(), 1);
    assert_eq!(full.rows()[0].date, Some(date(2025, 2, 1)));
}

#[test]
fn test_csv_store_roundtrip_and_audit() {
    let (dir, _) = setup_test_store("csv_roundtrip");
    let mut store = CsvStore::open(&dir).expect("open csv store");

    let wire = serialize(&sample_rows()).expect("serialize");
    store.write(SHEET, &to_sheet(&wire)).expect("write");
    store.append_audit("save", "admin", "3 row(s)").expect("audit");

    let full = load(&mut store, SHEET).expect("load");
    assert_eq!(full.rows(), sample_rows().rows());

    let entries = store.audit_entries().expect("audit entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].operation, "save");
}

#[test]
fn test_sqlite_audit_is_most_recent_first() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    store.append_audit("import", "admin", "first").expect("audit");
    store.append_audit("save", "admin", "second").expect("audit");

    let entries = store.audit_entries().expect("audit entries");
    let messages: Vec<&str> = entries
        .iter()
        .filter(|e| e.operation != "migration_applied")
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages, vec!["second", "first"]);
}

#[test]
fn test_cache_serves_reads_until_write() {
    let mut store = CachedStore::new(seeded_sqlite(), Duration::from_secs(60));

    load(&mut store, SHEET).expect("load");
    assert!(store.is_cached(SHEET));

    // bypass the cache: the cached copy is still served
    store
        .inner_mut()
        .write(SHEET, &to_sheet(&[]))
        .expect("write behind the cache");
    assert_eq!(load(&mut store, SHEET).expect("load").len(), 3);

    // a write through the cache drops the cached copy
    store.write(SHEET, &to_sheet(&[])).expect("write");
    assert!(!store.is_cached(SHEET));
    assert_eq!(load(&mut store, SHEET).expect("load").len(), 0);
}

#[test]
fn test_cache_with_zero_ttl_never_caches() {
    let mut store = CachedStore::new(seeded_sqlite(), Duration::ZERO);
    load(&mut store, SHEET).expect("load");
    assert!(!store.is_cached(SHEET));
}

#[test]
fn test_save_unfiltered_assigns_ids_and_writes_once() {
    let mut store = seeded_sqlite();
    let full = load(&mut store, SHEET).expect("load");
    let view = View::all(&full);

    let mut edited = full.rows().to_vec();
    edited.push(workshop(None, "NEW1", "Nuevo"));
    edited.push(workshop(None, "NEW2", "nan"));

    let report = SaveLogic::apply(
        &mut store,
        SHEET,
        &full,
        edited,
        &view,
        &admin(),
        SaveOptions::default(),
    )
    .expect("save");

    assert_eq!(report.ids_assigned, 2);
    assert_eq!(report.sentinels_filled, 1);
    assert!(report.format_warning.is_none());

    let reloaded = load(&mut store, SHEET).expect("reload");
    let ids: Vec<String> = reloaded
        .iter()
        .map(|r| r.id.as_ref().map(|i| i.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["1", "2", "5", "6", "7"]);
    assert_eq!(reloaded.rows()[4].facility_name, "");
}

#[test]
fn test_save_filtered_keeps_rows_outside_view() {
    let mut store = seeded_sqlite();
    let full = load(&mut store, SHEET).expect("load");
    let view = filter(&full, "hidalgo");

    let mut row = view.rows(&full)[0].clone();
    row.workshop_name = "Ajedrez avanzado".into();

    SaveLogic::apply(
        &mut store,
        SHEET,
        &full,
        vec![row],
        &view,
        &admin(),
        SaveOptions::default(),
    )
    .expect("save");

    let reloaded = load(&mut store, SHEET).expect("reload");
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.rows()[2].workshop_name, "Ajedrez avanzado");
    assert_eq!(reloaded.rows()[0].workshop_name, "Robotica");
}

#[test]
fn test_save_blocked_by_format_warning_writes_nothing() {
    let mut store = seeded_sqlite();
    let full = load(&mut store, SHEET).expect("load");
    let view = View::all(&full);

    let mut edited = full.rows().to_vec();
    edited[0].date = Some(date(12000, 1, 1));

    let options = SaveOptions {
        on_format_warning: FormatWarningPolicy::Block,
        ..SaveOptions::default()
    };
    let err = SaveLogic::apply(&mut store, SHEET, &full, edited, &view, &admin(), options)
        .expect_err("blocked");
    assert!(matches!(err, AppError::FormatBlocked(1)));

    let reloaded = load(&mut store, SHEET).expect("reload");
    assert_eq!(reloaded.rows()[0].date, Some(date(2025, 12, 26)));
}

#[test]
fn test_save_requires_authenticated_session() {
    let mut store = seeded_sqlite();
    let full = load(&mut store, SHEET).expect("load");
    let view = View::all(&full);

    let mut session = admin();
    session.authenticated = false;

    let err = SaveLogic::apply(
        &mut store,
        SHEET,
        &full,
        vec![],
        &view,
        &session,
        SaveOptions::default(),
    )
    .expect_err("not authenticated");
    assert!(matches!(err, AppError::Auth(_)));
    assert_eq!(load(&mut store, SHEET).expect("reload").len(), 3);
}

#[test]
fn test_save_write_failure_keeps_state_and_retry_succeeds() {
    let mut store = FlakyStore::new(true);
    let full = load(&mut store, SHEET).expect("load");
    let before = full.clone();
    let view = View::all(&full);

    let mut edited = full.rows().to_vec();
    edited.push(workshop(None, "NEW", "Nuevo"));

    let err = SaveLogic::apply(
        &mut store,
        SHEET,
        &full,
        edited.clone(),
        &view,
        &admin(),
        SaveOptions::default(),
    )
    .expect_err("write rejected");
    assert!(matches!(err, AppError::Connection(_)));
    assert_eq!(full, before);
    assert_eq!(load(&mut store, SHEET).expect("reload").len(), 3);

    store.failing = false;
    let report = SaveLogic::apply(
        &mut store,
        SHEET,
        &full,
        edited,
        &view,
        &admin(),
        SaveOptions::default(),
    )
    .expect("retry");
    assert_eq!(report.ids_assigned, 1);
    assert_eq!(load(&mut store, SHEET).expect("reload").len(), 4);
}

#[test]
fn test_csv_store_write_failure_is_connection_error() {
    let (dir, _) = setup_test_store("csv_write_failure");
    let mut store = CsvStore::open(&dir).expect("open csv store");
    fs::remove_dir_all(&dir).expect("remove store dir");

    let err = store.write(SHEET, &to_sheet(&[])).expect_err("missing directory");
    assert!(matches!(err, AppError::Connection(_)));
}

#[test]
fn test_cache_dropped_when_write_fails() {
    let mut store = CachedStore::new(FlakyStore::new(false), Duration::from_secs(60));
    load(&mut store, SHEET).expect("load");
    assert!(store.is_cached(SHEET));

    store.inner_mut().failing = true;
    assert!(store.write(SHEET, &to_sheet(&[])).is_err());
    assert!(!store.is_cached(SHEET));
}

#[test]
fn test_replace_assigns_ids_and_clears_placeholders() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");
    let mut dated = workshop(None, "A", "nan");
    dated.date = Some(date(2024, 5, 1));
    let rows = vec![workshop(Some(3), "B", "b"), dated];

    let report = SaveLogic::replace(
        &mut store,
        SHEET,
        rows,
        "admin",
        "import.csv",
        SaveOptions::default(),
    )
    .expect("replace");
    assert_eq!(report.ids_assigned, 1);

    let sheet = store.read(SHEET, 9).expect("read");
    assert_eq!(sheet.rows[1][0], SheetValue::Text("4".into()));
    assert_eq!(sheet.rows[1][4], SheetValue::Empty);
    assert_eq!(sheet.rows[1][8], SheetValue::Text("01/05/2024".into()));

    let entries = store.audit_entries().expect("audit");
    assert_eq!(entries[0].operation, "import");
}
