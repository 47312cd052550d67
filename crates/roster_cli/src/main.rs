//! `roster` - command-line front end for the student roster.
//!
//! Each subcommand drives the same presenters a graphical front end would:
//! `add` fills the creation form, the mutating commands open the listing
//! panel's dialogs and answer them from a stdin prompt (or `--yes`).

mod cli;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use cli::{AddArgs, Cli, Command, EditArgs, TargetArgs};
use log::info;
use roster_core::db::open_db;
use roster_core::ui::listing_panel::CANCEL_LABEL;
use roster_core::{
    init_logging, ConfirmOutcome, CreationForm, Dialog, ListingPanel, RosterRow, RosterService,
    SqliteStudentRepository, StudentField, StudentRepository, SubmitOutcome,
};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let db_path = config.resolve_db_path(&cwd);
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open roster at {}", db_path.display()))?;
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));

    match cli.command {
        Command::Add(args) => run_add(&mut service, args),
        Command::List => run_list(&service),
        Command::Block(args) => run_block(&mut service, args),
        Command::Edit(args) => run_edit(&mut service, args),
        Command::Delete(args) => run_delete(&mut service, args),
    }
}

fn run_add<R: StudentRepository>(
    service: &mut RosterService<R>,
    args: AddArgs,
) -> anyhow::Result<()> {
    let mut form = CreationForm::new();
    form.set_field(StudentField::Id, args.id);
    form.set_field(StudentField::Name, args.name);
    form.set_field(StudentField::DayOfBirth, args.birth);
    form.set_field(StudentField::Email, args.email);

    let outcome = form.submit(service, |record| {
        info!("event=cli_add module=cli status=ok student_id={}", record.id);
    })?;
    let message = form
        .message()
        .map(|message| message.text())
        .unwrap_or_default();

    match outcome {
        SubmitOutcome::Added(_) => {
            println!("{message}");
            run_list(service)
        }
        SubmitOutcome::Rejected(_) => bail!("{message}"),
    }
}

fn run_list<R: StudentRepository>(service: &RosterService<R>) -> anyhow::Result<()> {
    let panel = ListingPanel::load(service)?;
    print_table(&panel.rows());
    Ok(())
}

fn run_block<R: StudentRepository>(
    service: &mut RosterService<R>,
    args: TargetArgs,
) -> anyhow::Result<()> {
    let mut panel = ListingPanel::load(service)?;
    panel.request_block(args.id.as_str());
    match answer_dialog(&mut panel, service, args.yes)? {
        Some(ConfirmOutcome::Blocked { found: false }) => {
            println!("Không tìm thấy sinh viên {}", args.id)
        }
        Some(_) => print_table(&panel.rows()),
        None => {}
    }
    Ok(())
}

fn run_delete<R: StudentRepository>(
    service: &mut RosterService<R>,
    args: TargetArgs,
) -> anyhow::Result<()> {
    let mut panel = ListingPanel::load(service)?;
    panel.request_delete(args.id.as_str());
    match answer_dialog(&mut panel, service, args.yes)? {
        Some(ConfirmOutcome::Deleted { removed: false }) => {
            println!("Không tìm thấy sinh viên {}", args.id)
        }
        Some(_) => print_table(&panel.rows()),
        None => {}
    }
    Ok(())
}

fn run_edit<R: StudentRepository>(
    service: &mut RosterService<R>,
    args: EditArgs,
) -> anyhow::Result<()> {
    let mut panel = ListingPanel::load(service)?;
    if !panel.request_edit(&args.id) {
        bail!("Không tìm thấy sinh viên {}", args.id);
    }

    let changes = [
        (StudentField::Name, args.name),
        (StudentField::DayOfBirth, args.birth),
        (StudentField::Email, args.email),
    ];
    for (field, value) in changes {
        if let Some(value) = value {
            panel.edit_field(field, value);
        }
    }

    match answer_dialog(&mut panel, service, args.yes)? {
        Some(ConfirmOutcome::EditRejected(err)) => bail!("{}", err.user_message()),
        Some(ConfirmOutcome::EditTargetMissing) => {
            bail!("Không tìm thấy sinh viên {}", args.id)
        }
        Some(_) => print_table(&panel.rows()),
        None => {}
    }
    Ok(())
}

/// Shows the open dialog and confirms or cancels it.
///
/// Returns `None` when the user declined.
fn answer_dialog<R: StudentRepository>(
    panel: &mut ListingPanel,
    service: &mut RosterService<R>,
    assume_yes: bool,
) -> anyhow::Result<Option<ConfirmOutcome>> {
    let Some(dialog) = panel.open_dialog() else {
        return Ok(None);
    };

    if !assume_yes {
        print_dialog(dialog);
        if !prompt_yes(dialog.confirm_label())? {
            panel.cancel();
            println!("{CANCEL_LABEL}");
            return Ok(None);
        }
    }

    Ok(Some(panel.confirm(service)?))
}

fn print_dialog(dialog: &Dialog) {
    println!("== {} ==", dialog.title());
    match dialog {
        Dialog::Edit { draft } => {
            println!("Mã Sinh viên: {}", draft.id);
            println!("Tên sinh viên: {}", draft.name);
            println!("Ngày sinh: {}", draft.day_of_birth);
            println!("Email: {}", draft.email);
        }
        other => {
            if let Some(body) = other.body() {
                println!("{body}");
            }
        }
    }
}

fn prompt_yes(confirm_label: &str) -> anyhow::Result<bool> {
    print!("{confirm_label}? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn print_table(rows: &[RosterRow]) {
    println!(
        "{:<4} {:<10} {:<24} {:<12} {:<28} Trạng thái",
        "#", "Mã SV", "Tên sinh viên", "Ngày sinh", "Email"
    );
    for row in rows {
        println!(
            "{:<4} {:<10} {:<24} {:<12} {:<28} {}",
            row.position,
            row.id,
            row.name,
            row.birth_date,
            row.email,
            row.status.label()
        );
    }
}
