use std::fs;
use std::path::{Path, PathBuf};

use crate::date::format_iso_date;
use crate::money::{format_currency, format_price};
use crate::records::{SalesRecord, TransactionRecord};
use crate::{ClientError, ClientResult};

pub(crate) const MERGED_ARTIFACT: &str = "merged_output.csv";
pub(crate) const SORTED_ARTIFACT: &str = "sorted.csv";
pub(crate) const SALES_ARTIFACT: &str = "sales.csv";

pub(crate) const TRANSACTION_COLUMNS: [&str; 5] = ["product", "date", "region", "quantity", "price"];
pub(crate) const SALES_COLUMNS: [&str; 5] = ["sales", "date", "region", "quantity", "price"];

/// `pink morsel` -> `filtered_pink_morsel.csv`
pub(crate) fn filtered_artifact_name(product: &str) -> String {
    let mut slug = String::with_capacity(product.len());
    for character in product.trim().chars() {
        if character.is_ascii_alphanumeric() {
            slug.push(character.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        return "filtered.csv".to_string();
    }
    format!("filtered_{slug}.csv")
}

pub(crate) fn ensure_output_dir(dir: &Path) -> ClientResult<()> {
    fs::create_dir_all(dir)
        .map_err(|error| ClientError::artifact_write_failed(dir, &error.to_string()))
}

pub(crate) fn write_transactions(path: &Path, rows: &[TransactionRecord]) -> ClientResult<()> {
    write_atomically(path, rows.len(), |writer| {
        write_row(writer, path, &TRANSACTION_COLUMNS)?;
        for row in rows {
            let date = format_iso_date(&row.date);
            let quantity = row.quantity.to_string();
            let price = format_price(row.price);
            write_row(
                writer,
                path,
                &[
                    row.product.as_str(),
                    date.as_str(),
                    row.region.as_str(),
                    quantity.as_str(),
                    price.as_str(),
                ],
            )?;
        }
        Ok(())
    })
}

pub(crate) fn write_sales(path: &Path, rows: &[SalesRecord]) -> ClientResult<()> {
    write_atomically(path, rows.len(), |writer| {
        write_row(writer, path, &SALES_COLUMNS)?;
        for row in rows {
            let sales = format_currency(row.sales);
            let date = format_iso_date(&row.date);
            let quantity = row.quantity.to_string();
            let price = format_price(row.price);
            write_row(
                writer,
                path,
                &[
                    sales.as_str(),
                    date.as_str(),
                    row.region.as_str(),
                    quantity.as_str(),
                    price.as_str(),
                ],
            )?;
        }
        Ok(())
    })
}

/// `sales.csv` -> `sales.csv.tmp`, in the same directory.
fn staging_path(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");
    path.with_extension(format!("{extension}.tmp"))
}

/// Writes the artifact to its staging file and renames it over `path` only
/// once every row is flushed. On failure the staging file is removed and
/// `path` is left as it was.
fn write_atomically<F>(path: &Path, rows: usize, write: F) -> ClientResult<()>
where
    F: FnOnce(&mut csv::Writer<fs::File>) -> ClientResult<()>,
{
    let staging = staging_path(path);
    let result = (|| -> ClientResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&staging)
            .map_err(|error| ClientError::artifact_write_failed(path, &error.to_string()))?;
        write(&mut writer)?;
        writer
            .flush()
            .map_err(|error| ClientError::artifact_write_failed(path, &error.to_string()))?;
        drop(writer);
        fs::rename(&staging, path)
            .map_err(|error| ClientError::artifact_write_failed(path, &error.to_string()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&staging);
        return result;
    }
    tracing::debug!(path = %path.display(), rows, "wrote artifact");
    Ok(())
}

fn write_row(
    writer: &mut csv::Writer<fs::File>,
    path: &Path,
    fields: &[&str],
) -> ClientResult<()> {
    writer
        .write_record(fields)
        .map_err(|error| ClientError::artifact_write_failed(path, &error.to_string()))
}
