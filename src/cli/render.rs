//! Rendering of book and member listings.

use std::io::{self, Write};

use catalog::{Book, Catalog, Member};

/// How listings are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,
    /// Pretty-printed JSON array.
    Json,
}

/// Writes every book in the catalog.
///
/// An empty catalog is reported with a message rather than an empty table.
pub fn books(catalog: &Catalog, format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
    let books = catalog.books();
    match format {
        OutputFormat::Json => write_json(books, out),
        OutputFormat::Table if books.is_empty() => {
            writeln!(out, "No books in the library.")?;
            Ok(())
        }
        OutputFormat::Table => {
            let rows = books.iter().map(book_row).collect();
            write_table(
                &["ID", "Title", "Author", "Level", "Availability"],
                rows,
                out,
            )
        }
    }
}

/// Writes every member in the catalog, with the titles of the books they
/// hold.
pub fn members(
    catalog: &Catalog,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    let members = catalog.members();
    match format {
        OutputFormat::Json => write_json(members, out),
        OutputFormat::Table if members.is_empty() => {
            writeln!(out, "No members in the library.")?;
            Ok(())
        }
        OutputFormat::Table => {
            let rows = members
                .iter()
                .map(|member| member_row(catalog, member))
                .collect();
            write_table(&["ID", "Name", "Email", "Level", "Borrowed"], rows, out)
        }
    }
}

fn book_row(book: &Book) -> Vec<String> {
    let availability = if book.is_available() {
        "Available"
    } else {
        "Not Available"
    };
    vec![
        book.id().to_string(),
        book.title().to_string(),
        book.author().to_string(),
        book.level().to_string(),
        availability.to_string(),
    ]
}

fn member_row(catalog: &Catalog, member: &Member) -> Vec<String> {
    let borrowed = member
        .borrowed()
        .iter()
        .filter_map(|id| catalog.book(*id))
        .map(Book::title)
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        member.id().to_string(),
        member.name().to_string(),
        member.email().to_string(),
        member.level().to_string(),
        borrowed,
    ]
}

fn write_json<T: serde::Serialize>(items: &[T], out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, items)?;
    writeln!(out)?;
    Ok(())
}

fn write_table(headers: &[&str], data: Vec<Vec<String>>, out: &mut impl Write) -> io::Result<()> {
    // Determine column widths for alignment.
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            data.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect::<Vec<_>>();

    writeln!(out, "{}", pad_row(headers.iter().map(ToString::to_string), &widths))?;
    writeln!(
        out,
        "{}",
        pad_row(widths.iter().map(|width| "-".repeat(*width)), &widths)
    )?;
    for row in data {
        writeln!(out, "{}", pad_row(row, &widths))?;
    }
    Ok(())
}

fn pad_row(cells: impl IntoIterator<Item = String>, widths: &[usize]) -> String {
    cells
        .into_iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
