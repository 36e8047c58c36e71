use crate::record::Record;
use anyhow::Context;
use nom::{
    IResult,
    bytes::complete::take_while,
    character::complete::char,
    combinator::{opt, rest},
};
use std::path::Path;

/// On-disk layout for bulk import and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of `{username, phoneNumber, address}`.
    Json,
    /// One `username,phone,address` record per line.
    Lines,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Lines,
        }
    }
}

pub fn encode(records: &[Record], format: ExportFormat) -> anyhow::Result<String> {
    match format {
        ExportFormat::Json => encode_json(records),
        ExportFormat::Lines => encode_lines(records),
    }
}

pub fn decode(input: &str, format: ExportFormat) -> anyhow::Result<Vec<Record>> {
    match format {
        ExportFormat::Json => decode_json(input),
        ExportFormat::Lines => Ok(decode_lines(input)),
    }
}

pub fn encode_json(records: &[Record]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn decode_json(input: &str) -> anyhow::Result<Vec<Record>> {
    serde_json::from_str(input).context("invalid JSON record list")
}

/// Fails on records the line format cannot carry back: a comma in the
/// username or phone, or a line break in any field.
pub fn encode_lines(records: &[Record]) -> anyhow::Result<String> {
    let mut out = String::new();
    for r in records {
        if r.username.contains(',') || r.phone_number.contains(',') {
            anyhow::bail!(
                "record '{}' has a comma in its username or phone; export it as .json",
                r.username
            );
        }
        if [&r.username, &r.phone_number, &r.address]
            .iter()
            .any(|f| f.contains(['\n', '\r']))
        {
            anyhow::bail!("record '{}' spans more than one line", r.username);
        }
        out.push_str(&format!("{},{},{}\n", r.username, r.phone_number, r.address));
    }
    Ok(out)
}

/// Lines without a username or phone number are skipped.
pub fn decode_lines(input: &str) -> Vec<Record> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| record_line(line).ok().map(|(_, fields)| fields))
        .filter(|(user, phone, _)| !user.is_empty() && !phone.is_empty())
        .map(|(user, phone, addr)| Record::new(user, phone, addr))
        .collect()
}

fn field(input: &str) -> IResult<&str, &str> {
    let (input, value) = take_while(|c| c != ',')(input)?;
    Ok((input, value.trim()))
}

fn record_line(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (input, username) = field(input)?;
    let (input, _) = opt(char(','))(input)?;
    let (input, phone) = field(input)?;
    let (input, _) = opt(char(','))(input)?;
    let (input, address) = rest(input)?;
    Ok((input, (username, phone, address.trim())))
}
