mod common;
use common::{date, sample_rows, temp_out};
use std::fs;
use std::path::Path;
use talleres::core::filter::{View, filter};
use talleres::core::session::{Credentials, Session};
use talleres::errors::AppError;
use talleres::grid::{read_grid, write_grid};
use talleres::models::{Column, Level, Role};

fn login(user: &str) -> Session {
    let creds = Credentials::new(Some("a".into()), Some("u".into()));
    let pw = if user == "admin" { "a" } else { "u" };
    Session::login(&creds, user, pw).expect("login")
}

/// Write the grid, let `edit` rewrite its text, return the new text path.
fn edited_grid(name: &str, view_query: &str, edit: impl FnOnce(String) -> String) -> String {
    let full = sample_rows();
    let view = filter(&full, view_query);
    let path = temp_out(name, "csv");
    write_grid(Path::new(&path), &full, &view).expect("write grid");

    let text = fs::read_to_string(&path).expect("read grid");
    fs::write(&path, edit(text)).expect("rewrite grid");
    path
}

#[test]
fn test_login_roles_and_failures() {
    assert_eq!(login("admin").role, Role::Admin);
    assert_eq!(login("usuario").role, Role::Editor);

    let creds = Credentials::new(Some("a".into()), None);
    assert!(matches!(
        Session::login(&creds, "admin", "wrong"),
        Err(AppError::Auth(_))
    ));
    // an account without a configured secret cannot log in
    assert!(Session::login(&creds, "usuario", "").is_err());
    assert!(Session::login(&creds, "root", "a").is_err());
}

#[test]
fn test_role_column_permissions() {
    for col in [Column::Sesiones, Column::Taller, Column::Fecha] {
        assert!(Role::Editor.can_edit(col));
        assert!(Role::Admin.can_edit(col));
    }
    for col in [Column::Cct, Column::Nivel, Column::Turno, Column::Plantel, Column::Direccion] {
        assert!(!Role::Editor.can_edit(col));
        assert!(Role::Admin.can_edit(col));
    }
    assert!(!Role::Admin.can_edit(Column::No));
    assert!(!Role::Editor.can_insert_rows());
    assert!(!Role::Editor.can_delete_rows());
}

#[test]
fn test_grid_starts_with_key_column() {
    let path = edited_grid("grid_header", "", |t| t);
    let text = fs::read_to_string(&path).expect("read grid");
    let header = text.lines().next().unwrap_or_default();
    assert_eq!(header, "_key,No,CCT,Nivel,Turno,Plantel,Direccion,Sesiones,Taller,Fecha");
    assert!(text.contains("26/12/2025"));
}

#[test]
fn test_editor_may_change_sessions_but_not_level() {
    let path = edited_grid("grid_editor_level", "", |t| {
        t.replace("PREESCOLAR,VESPERTINO", "SECUNDARIA,VESPERTINO")
            .replace("Lectura", "Lectura en voz alta")
    });

    let full = sample_rows();
    let view = View::all(&full);
    let edit = read_grid(Path::new(&path), &full, &view, &login("usuario")).expect("read grid");

    let row = &edit.rows[1];
    assert_eq!(row.level, Some(Level::Preescolar));
    assert_eq!(row.workshop_name, "Lectura en voz alta");
    assert!(
        edit.issues
            .iter()
            .any(|i| i.column == Some(Column::Nivel) && i.message.contains("read-only"))
    );
}

#[test]
fn test_admin_edit_rejects_values_outside_options() {
    let path = edited_grid("grid_admin_options", "", |t| {
        t.replace("PREESCOLAR", "KINDER").replace(",2,Lectura", ",dos,Lectura")
    });

    let full = sample_rows();
    let view = View::all(&full);
    let edit = read_grid(Path::new(&path), &full, &view, &login("admin")).expect("read grid");

    let row = &edit.rows[1];
    assert_eq!(row.level, Some(Level::Preescolar));
    assert_eq!(row.session_count, Some(2));
    assert_eq!(edit.issues.len(), 2);
}

#[test]
fn test_editor_cannot_insert_or_delete_rows() {
    let path = edited_grid("grid_editor_rows", "", |t| {
        let mut lines: Vec<&str> = t.lines().collect();
        // drop the last row and add a new one
        lines.pop();
        let mut out = lines.join("\n");
        out.push_str("\n,,NEW,PRIMARIA,MIXTO,Nuevo,Calle,1,Canto,01/03/2025\n");
        out
    });

    let full = sample_rows();
    let view = View::all(&full);
    let edit = read_grid(Path::new(&path), &full, &view, &login("usuario")).expect("read grid");

    let codes: Vec<&str> = edit.rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["15EPR0001A", "15EJN0002B", "15EPR0003C"]);
    assert_eq!(edit.issues.len(), 2);
}

#[test]
fn test_admin_may_insert_and_delete_rows() {
    let path = edited_grid("grid_admin_rows", "escuela", |t| {
        let mut lines: Vec<&str> = t.lines().collect();
        lines.pop();
        let mut out = lines.join("\n");
        out.push_str("\n,99,NEW,PRIMARIA,MIXTO,Escuela Nueva,Calle,1,Canto,01/03/2025\n");
        out
    });

    let full = sample_rows();
    let view = filter(&full, "escuela");
    let edit = read_grid(Path::new(&path), &full, &view, &login("admin")).expect("read grid");

    assert_eq!(edit.rows.len(), 2);
    let added = &edit.rows[1];
    assert_eq!(added.key, None);
    // ids are assigned on save
    assert_eq!(added.id, None);
    assert_eq!(added.date, Some(date(2025, 3, 1)));
    assert_eq!(edit.issues.len(), 1);
}

#[test]
fn test_grid_without_key_column_is_rejected() {
    let path = temp_out("grid_no_key", "csv");
    fs::write(&path, "No,CCT\n1,A\n").expect("write grid");

    let full = sample_rows();
    let view = View::all(&full);
    let err = read_grid(Path::new(&path), &full, &view, &login("admin")).expect_err("bad layout");
    assert!(matches!(err, AppError::Grid(_)));
}
