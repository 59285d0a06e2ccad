//! Terminal renditions of the listing forms: prompting, field binding, and
//! the parsing the browser's input types would otherwise do.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, NaiveDate, Utc};

use crate::listing::{Listing, ListingUpdate, NewListing};

/// Runs the creation form: prompts for all nine fields, re-prompting until
/// each required value is present and well-formed.
pub fn creation_form() -> io::Result<NewListing> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    creation_form_from(&mut input)
}

/// Runs the edit form over a fetched listing. Every prompt is pre-populated
/// with the stored value; an empty answer keeps it. Only changed fields end
/// up in the update.
pub fn edit_form(current: &Listing) -> io::Result<ListingUpdate> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    edit_form_from(current, &mut input)
}

/// Asks for an explicit yes before a destructive action.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    confirm_from(question, &mut input)
}

/// Truncates a stored timestamp to the calendar date shown in date inputs.
pub fn date_input(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn creation_form_from(input: &mut impl BufRead) -> io::Result<NewListing> {
    Ok(NewListing {
        company_name: required(input, "Company name")?,
        position: required(input, "Position")?,
        duration: required(input, "Duration (e.g. 3 months)")?,
        stipend: required_stipend(input, "Monthly stipend")?,
        location: required(input, "Location")?,
        description: required(input, "Description")?,
        requirements: required(input, "Requirements")?,
        application_deadline: required_date(input, "Application deadline (YYYY-MM-DD)")?,
        start_date: required_date(input, "Start date (YYYY-MM-DD)")?,
    })
}

fn edit_form_from(current: &Listing, input: &mut impl BufRead) -> io::Result<ListingUpdate> {
    Ok(ListingUpdate {
        company_name: revised(input, "Company name", &current.company_name)?,
        position: revised(input, "Position", &current.position)?,
        duration: revised(input, "Duration", &current.duration)?,
        stipend: revised_stipend(input, "Monthly stipend", current.stipend)?,
        location: revised(input, "Location", &current.location)?,
        description: revised(input, "Description", &current.description)?,
        requirements: revised(input, "Requirements", &current.requirements)?,
        application_deadline: revised_date(
            input,
            "Application deadline",
            &current.application_deadline,
        )?,
        start_date: revised_date(input, "Start date", &current.start_date)?,
    })
}

fn confirm_from(question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    let answer = read_line(input, &format!("{} [y/N]", question))?;

    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn read_line(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }

    Ok(line.trim().to_string())
}

fn required(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    loop {
        let answer = read_line(input, label)?;

        if !answer.is_empty() {
            return Ok(answer);
        }

        println!("This field is required.");
    }
}

fn required_stipend(input: &mut impl BufRead, label: &str) -> io::Result<f64> {
    loop {
        if let Ok(stipend) = required(input, label)?.parse::<f64>() {
            return Ok(stipend);
        }

        println!("Please enter a number.");
    }
}

fn required_date(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    loop {
        let answer = required(input, label)?;

        if answer.parse::<NaiveDate>().is_ok() {
            return Ok(answer);
        }

        println!("Please enter a date as YYYY-MM-DD.");
    }
}

fn revised(input: &mut impl BufRead, label: &str, current: &str) -> io::Result<Option<String>> {
    let answer = read_line(input, &format!("{} [{}]", label, current))?;

    Ok(if answer.is_empty() || answer == current {
        None
    } else {
        Some(answer)
    })
}

fn revised_stipend(
    input: &mut impl BufRead,
    label: &str,
    current: f64,
) -> io::Result<Option<f64>> {
    loop {
        let answer = read_line(input, &format!("{} [{}]", label, current))?;

        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<f64>() {
            Ok(stipend) if stipend == current => return Ok(None),
            Ok(stipend) => return Ok(Some(stipend)),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn revised_date(
    input: &mut impl BufRead,
    label: &str,
    current: &DateTime<Utc>,
) -> io::Result<Option<String>> {
    let shown = date_input(current);

    loop {
        let answer = read_line(input, &format!("{} [{}]", label, shown))?;

        if answer.is_empty() || answer == shown {
            return Ok(None);
        }

        if answer.parse::<NaiveDate>().is_ok() {
            return Ok(Some(answer));
        }

        println!("Please enter a date as YYYY-MM-DD.");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{confirm_from, creation_form_from, date_input, edit_form_from};
    use crate::listing::Listing;

    fn listing() -> Listing {
        let now = Utc.ymd(2024, 4, 1).and_hms(12, 0, 0);

        Listing {
            id: Uuid::new_v4(),
            company_name: "Acme".to_string(),
            position: "Backend Intern".to_string(),
            duration: "3 months".to_string(),
            stipend: 5000.0,
            location: "Remote".to_string(),
            description: "Work on the API.".to_string(),
            requirements: "Rust".to_string(),
            application_deadline: Utc.ymd(2024, 5, 1).and_hms(0, 0, 0),
            start_date: Utc.ymd(2024, 6, 1).and_hms(0, 0, 0),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn the_creation_form_parses_and_reprompts() {
        // "lots" is rejected by the stipend prompt; "5000" is its retry
        let mut input = Cursor::new(
            "Acme\nBackend Intern\n3 months\nlots\n5000\nRemote\nWork on the API.\nRust\n2024-05-01\n2024-06-01\n",
        );

        let listing = creation_form_from(&mut input).expect("fill in creation form");

        assert_eq!(listing.company_name, "Acme");
        assert_eq!(listing.stipend, 5000.0);
        assert_eq!(listing.application_deadline, "2024-05-01");
    }

    #[test]
    fn the_edit_form_keeps_unchanged_fields() {
        // change only the stipend; everything else keeps the stored value,
        // including the date answered with the pre-populated calendar date
        let mut input = Cursor::new("\n\n\n6000\n\n\n\n2024-05-01\n\n");

        let update = edit_form_from(&listing(), &mut input).expect("fill in edit form");

        assert_eq!(update.stipend, Some(6000.0));
        assert!(update.company_name.is_none());
        assert!(update.application_deadline.is_none());
        assert!(update.start_date.is_none());
    }

    #[test]
    fn dates_are_pre_populated_as_calendar_dates() {
        assert_eq!(
            date_input(&Utc.ymd(2024, 5, 1).and_hms(0, 0, 0)),
            "2024-05-01"
        );
    }

    #[test]
    fn deletion_requires_an_explicit_yes() {
        let question = "Are you sure you want to delete this internship?";

        assert!(confirm_from(question, &mut Cursor::new("y\n")).expect("confirm"));
        assert!(confirm_from(question, &mut Cursor::new("yes\n")).expect("confirm"));
        assert!(!confirm_from(question, &mut Cursor::new("\n")).expect("confirm"));
        assert!(!confirm_from(question, &mut Cursor::new("no\n")).expect("confirm"));
    }
}
