use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::core::services::{
    CreditCardService, ForecastReport, ForecastService, RecurringService, SettingsService,
    TransactionService,
};
use crate::currency::{format_date, is_supported_date_format};
use crate::ledger::{
    CreditCardRule, Ledger, RecurringRule, ResolvedSettings, Transaction, TransactionKind,
};

use super::output::{self, MessageKind};
use super::table::{Table, TableColumn};
use super::{App, CliError, CliResult};

fn usage(text: &str) -> CliError {
    CliError::Usage(format!("usage: budget_forecast {text}"))
}

fn take<'a, const N: usize>(args: &'a [String], text: &str) -> CliResult<[&'a str; N]> {
    if args.len() != N {
        return Err(usage(text));
    }
    let mut taken = [""; N];
    for (slot, arg) in taken.iter_mut().zip(args) {
        *slot = arg.as_str();
    }
    Ok(taken)
}

fn parse_amount(raw: &str) -> CliResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not a valid amount")))
}

fn parse_kind(raw: &str) -> CliResult<TransactionKind> {
    TransactionKind::from_str(raw).map_err(|_| {
        CliError::Usage(format!("`{raw}` is not a transaction type (credit or debit)"))
    })
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a date (YYYY-MM-DD)")))
}

fn parse_day(raw: &str) -> CliResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a day of the month")))
}

fn resolved(app: &App, ledger: &Ledger) -> ResolvedSettings {
    ledger
        .settings
        .resolve_with_horizon(app.clock().today(), app.config().default_horizon_days)
}

fn report(app: &App, ledger: &Ledger) -> ForecastReport {
    ForecastService::run_with_horizon(
        ledger,
        app.clock().today(),
        app.config().default_horizon_days,
    )
}

pub fn forecast<W: Write>(app: &App, out: &mut W) -> CliResult {
    let ledger = app.load()?;
    let report = report(app, &ledger);
    let currency = report.settings.currency_symbol.as_str();
    let pattern = report.settings.date_format.as_str();

    writeln!(
        out,
        "{}",
        output::message(
            MessageKind::Section,
            format!(
                "Forecast {} to {} ({} days)",
                format_date(report.window.current_date, pattern),
                format_date(report.window.forecast_end_date, pattern),
                report.window.days()
            )
        )
    )?;

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Description"),
        TableColumn::right("Amount"),
        TableColumn::right("Balance"),
    ]);
    for entry in &report.projection.balance_history {
        let (description, amount) = match &entry.transaction {
            Some(txn) if txn.is_recurring => (
                format!("{} (recurring)", txn.name),
                output::movement(txn, currency),
            ),
            Some(txn) => (txn.name.clone(), output::movement(txn, currency)),
            None => ("Starting balance".to_string(), String::new()),
        };
        table.push(vec![
            format_date(entry.date, pattern),
            description,
            amount,
            output::balance(entry.balance, currency),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    writeln!(out)?;
    write_summary(&report, out)?;

    let outlook = ForecastService::credit_card_outlook(&ledger, report.window);
    if !outlook.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            output::message(MessageKind::Section, "Upcoming card payments")
        )?;
        let entries: Vec<(&str, String)> = outlook
            .iter()
            .map(|item| {
                let next = item
                    .next_date
                    .map(|date| format_date(date, pattern))
                    .unwrap_or_else(|| "none in window".to_string());
                (item.card.name.as_str(), next)
            })
            .collect();
        writeln!(out, "{}", output::fields(&entries))?;
    }
    Ok(())
}

pub fn summary<W: Write>(app: &App, out: &mut W) -> CliResult {
    let ledger = app.load()?;
    write_summary(&report(app, &ledger), out)
}

fn write_summary<W: Write>(report: &ForecastReport, out: &mut W) -> CliResult {
    let currency = report.settings.currency_symbol.as_str();
    let summary = &report.summary;
    writeln!(out, "{}", output::message(MessageKind::Section, "Summary"))?;
    writeln!(
        out,
        "{}",
        output::fields(&[
            (
                "Starting balance",
                output::balance(summary.starting_balance, currency),
            ),
            ("Ending balance", output::balance(summary.current_balance, currency)),
            ("Net change", output::balance(summary.net_change, currency)),
            (
                "Lowest balance",
                format!(
                    "{} on {}",
                    output::balance(summary.lowest_balance, currency),
                    format_date(summary.lowest_balance_date, &report.settings.date_format)
                ),
            ),
        ])
    )?;
    Ok(())
}

pub fn add_transaction<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let [name, amount, kind, date] =
        take::<4>(args, "add <name> <amount> <credit|debit> <YYYY-MM-DD>")?;
    let transaction = Transaction::new(
        name,
        parse_amount(amount)?,
        parse_kind(kind)?,
        parse_date(date)?,
    );

    let mut ledger = app.load()?;
    let id = TransactionService::add(&mut ledger, transaction, app.clock())?;
    app.manager().save_transactions(&ledger)?;
    writeln!(
        out,
        "{}",
        output::message(MessageKind::Success, format!("Added transaction {id}"))
    )?;
    Ok(())
}

pub fn remove_transaction<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let [id] = take::<1>(args, "remove <id>")?;
    let mut ledger = app.load()?;
    if TransactionService::remove(&mut ledger, id) {
        app.manager().save_transactions(&ledger)?;
        writeln!(
            out,
            "{}",
            output::message(MessageKind::Success, format!("Removed transaction {id}"))
        )?;
    } else {
        writeln!(out, "No transaction with id {id}")?;
    }
    Ok(())
}

pub fn clear_transactions<W: Write>(app: &App, out: &mut W) -> CliResult {
    let mut ledger = app.load()?;
    let removed = TransactionService::clear(&mut ledger);
    app.manager().save_transactions(&ledger)?;
    writeln!(
        out,
        "{}",
        output::message(MessageKind::Success, format!("Removed {removed} transaction(s)"))
    )?;
    Ok(())
}

pub fn recurring<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage("recurring <add|list|use|remove> ..."));
    };
    let mut ledger = app.load()?;

    match action.as_str() {
        "add" => {
            let [name, amount, kind, day] =
                take::<4>(rest, "recurring add <name> <amount> <credit|debit> <day>")?;
            let rule = RecurringRule::new(
                name,
                parse_amount(amount)?,
                parse_kind(kind)?,
                parse_day(day)?,
            );
            let id = RecurringService::add(&mut ledger, rule, app.clock())?;
            app.manager().save_recurring(&ledger)?;
            writeln!(
                out,
                "{}",
                output::message(MessageKind::Success, format!("Added recurring rule {id}"))
            )?;
        }
        "list" => {
            let currency = resolved(app, &ledger).currency_symbol;
            let mut table = Table::new(vec![
                TableColumn::left("Id"),
                TableColumn::left("Name"),
                TableColumn::right("Amount"),
                TableColumn::left("Type"),
                TableColumn::right("Day"),
            ]);
            for rule in RecurringService::list(&ledger) {
                table.push(vec![
                    rule.id.clone(),
                    rule.name.clone(),
                    crate::currency::format_currency(rule.amount, &currency),
                    rule.kind.to_string(),
                    rule.day_of_month
                        .map_or_else(|| "-".to_string(), |day| day.to_string()),
                ]);
            }
            writeln!(out, "{}", table.render())?;
        }
        "use" => {
            let [id] = take::<1>(rest, "recurring use <id>")?;
            let date = resolved(app, &ledger).window.current_date;
            let txn_id = RecurringService::use_rule(&mut ledger, id, date, app.clock())?;
            app.manager().save_transactions(&ledger)?;
            writeln!(
                out,
                "{}",
                output::message(
                    MessageKind::Success,
                    format!("Recorded transaction {txn_id} on {date}")
                )
            )?;
        }
        "remove" => {
            let [id] = take::<1>(rest, "recurring remove <id>")?;
            if RecurringService::remove(&mut ledger, id) {
                app.manager().save_recurring(&ledger)?;
                writeln!(
                    out,
                    "{}",
                    output::message(
                        MessageKind::Success,
                        format!("Removed recurring rule {id}")
                    )
                )?;
            } else {
                writeln!(out, "No recurring rule with id {id}")?;
            }
        }
        other => return Err(CliError::Usage(format!("unknown recurring action `{other}`"))),
    }
    Ok(())
}

pub fn card<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage("card <add|list|pay|remove> ..."));
    };
    let mut ledger = app.load()?;
    let settings = resolved(app, &ledger);

    match action.as_str() {
        "add" => {
            let [name, day] = take::<2>(rest, "card add <name> <day>")?;
            let card = CreditCardRule::new(name, parse_day(day)?);
            let id = CreditCardService::add(&mut ledger, card, app.clock())?;
            app.manager().save_credit_cards(&ledger)?;
            writeln!(
                out,
                "{}",
                output::message(MessageKind::Success, format!("Added credit card {id}"))
            )?;
        }
        "list" => {
            let mut table = Table::new(vec![
                TableColumn::left("Id"),
                TableColumn::left("Name"),
                TableColumn::right("Day"),
                TableColumn::left("Next payment"),
            ]);
            for item in ForecastService::credit_card_outlook(&ledger, settings.window) {
                table.push(vec![
                    item.card.id.clone(),
                    item.card.name.clone(),
                    item.card
                        .day_of_month
                        .map_or_else(|| "-".to_string(), |day| day.to_string()),
                    item.next_date
                        .map(|date| format_date(date, &settings.date_format))
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            writeln!(out, "{}", table.render())?;
        }
        "pay" => {
            let [id, amount] = take::<2>(rest, "card pay <id> <amount>")?;
            let txn_id = CreditCardService::record_payment(
                &mut ledger,
                id,
                parse_amount(amount)?,
                settings.window,
                app.clock(),
            )?;
            app.manager().save_transactions(&ledger)?;
            let date = ledger
                .transaction(&txn_id)
                .map(|txn| format_date(txn.date, &settings.date_format))
                .unwrap_or_default();
            writeln!(
                out,
                "{}",
                output::message(
                    MessageKind::Success,
                    format!("Recorded payment {txn_id} due {date}")
                )
            )?;
        }
        "remove" => {
            let [id] = take::<1>(rest, "card remove <id>")?;
            if CreditCardService::remove(&mut ledger, id) {
                app.manager().save_credit_cards(&ledger)?;
                writeln!(
                    out,
                    "{}",
                    output::message(MessageKind::Success, format!("Removed credit card {id}"))
                )?;
            } else {
                writeln!(out, "No credit card with id {id}")?;
            }
        }
        other => return Err(CliError::Usage(format!("unknown card action `{other}`"))),
    }
    Ok(())
}

pub fn settings<W: Write>(app: &App, args: &[String], out: &mut W) -> CliResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage("settings <show|set> ..."));
    };
    let mut ledger = app.load()?;

    match action.as_str() {
        "show" => {
            let settings = resolved(app, &ledger);
            let pattern = settings.date_format.as_str();
            writeln!(out, "{}", output::message(MessageKind::Section, "Settings"))?;
            writeln!(
                out,
                "{}",
                output::fields(&[
                    (
                        "Starting balance",
                        output::balance(settings.starting_balance, &settings.currency_symbol),
                    ),
                    (
                        "Current date",
                        format_date(settings.window.current_date, pattern),
                    ),
                    (
                        "Forecast end date",
                        format_date(settings.window.forecast_end_date, pattern),
                    ),
                    ("Currency", settings.currency_symbol.clone()),
                    ("Date format", settings.date_format.clone()),
                    ("Language", settings.language.clone()),
                ])
            )?;
        }
        "set" => {
            let [field, value] = take::<2>(rest, "settings set <field> <value>")?;
            let today = app.clock().today();
            match field {
                "starting-balance" => {
                    SettingsService::set_starting_balance(&mut ledger, parse_amount(value)?)?
                }
                "current-date" => {
                    SettingsService::set_current_date(&mut ledger, parse_date(value)?)
                }
                "end-date" => {
                    SettingsService::set_forecast_end_date(&mut ledger, parse_date(value)?)
                }
                "horizon" => {
                    let days = value.trim().parse::<i64>().map_err(|_| {
                        CliError::Usage(format!("`{value}` is not a number of days"))
                    })?;
                    SettingsService::quick_select(&mut ledger, days, today)?;
                }
                "currency" => SettingsService::set_currency(&mut ledger, value)?,
                "date-format" => {
                    if !is_supported_date_format(value) {
                        eprintln!(
                            "{}",
                            output::message(
                                MessageKind::Warning,
                                format!(
                                    "date format `{value}` is not supported; \
                                     dates will use MMM dd, yyyy"
                                )
                            )
                        );
                    }
                    SettingsService::set_date_format(&mut ledger, value)?;
                }
                "language" => SettingsService::set_language(&mut ledger, value)?,
                other => return Err(CliError::Usage(format!("unknown settings field `{other}`"))),
            }
            app.manager().save_settings(&ledger)?;
            writeln!(
                out,
                "{}",
                output::message(MessageKind::Success, format!("Updated {field}"))
            )?;
        }
        other => return Err(CliError::Usage(format!("unknown settings action `{other}`"))),
    }
    Ok(())
}
