use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Column;
use crate::ui::messages::info;
use crate::utils::colors::{GREEN, GREY, RESET};

/// Print the role banner and the columns the role may edit.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let session = super::session(cli, cfg)?;
    info(session.banner());

    for col in Column::ALL {
        let (mark, color) = if session.role.can_edit(col) {
            ("editable", GREEN)
        } else {
            ("read-only", GREY)
        };
        println!("  {:<12} {color}{mark}{RESET}", col.label());
    }

    let rows = if session.role.can_insert_rows() {
        "may add and delete rows"
    } else {
        "may edit existing rows only"
    };
    println!("\n  {rows}");

    session.logout();
    Ok(())
}
