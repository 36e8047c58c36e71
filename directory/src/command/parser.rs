use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, rest},
    sequence::{delimited, preceded},
};

use crate::command::ast::Command;
use crate::record::{KeyKind, Record};

pub fn parse_command(input: &str) -> anyhow::Result<Command> {
    let (remaining, cmd) =
        command(input).map_err(|e| anyhow::anyhow!("Parse error: {}", e))?;
    let remaining = remaining.trim();
    if !remaining.is_empty() {
        anyhow::bail!("Parse error: unexpected trailing input '{}'", remaining);
    }
    Ok(cmd)
}

fn command(input: &str) -> IResult<&str, Command> {
    preceded(
        multispace0,
        alt((
            insert_command,
            search_command,
            delete_command,
            table_command,
            import_command,
            export_command,
            simple_command,
        )),
    )(input)
}

fn simple_command(input: &str) -> IResult<&str, Command> {
    alt((
        map(tag_no_case("list"), |_| Command::List),
        map(tag_no_case("stats"), |_| Command::Stats),
        map(tag_no_case("clear"), |_| Command::Clear),
        map(tag_no_case("save"), |_| Command::Save),
        map(tag_no_case("load"), |_| Command::Load),
        map(tag_no_case("sample"), |_| Command::Sample),
    ))(input)
}

fn insert_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("insert")(input)?;
    let (input, username) = preceded(multispace1, token)(input)?;
    let (input, phone) = preceded(multispace1, token)(input)?;
    let (input, address) = opt(preceded(multispace1, address))(input)?;

    Ok((
        input,
        Command::Insert(Record::new(username, phone, address.unwrap_or_default())),
    ))
}

fn search_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("search")(input)?;
    let (input, (kind, key)) = keyed_argument(input)?;
    Ok((input, Command::Search { kind, key }))
}

fn delete_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("delete")(input)?;
    let (input, (kind, key)) = keyed_argument(input)?;
    Ok((input, Command::Delete { kind, key }))
}

fn table_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("table")(input)?;
    let (input, kind) = preceded(multispace1, key_kind)(input)?;
    Ok((input, Command::Table(kind)))
}

fn import_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("import")(input)?;
    let (input, path) = preceded(multispace1, token)(input)?;
    Ok((input, Command::Import(path)))
}

fn export_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("export")(input)?;
    let (input, path) = preceded(multispace1, token)(input)?;
    Ok((input, Command::Export(path)))
}

fn keyed_argument(input: &str) -> IResult<&str, (KeyKind, String)> {
    let (input, kind) = preceded(multispace1, key_kind)(input)?;
    let (input, key) = preceded(multispace1, token)(input)?;
    Ok((input, (kind, key)))
}

fn key_kind(input: &str) -> IResult<&str, KeyKind> {
    alt((
        map(tag_no_case("username"), |_| KeyKind::Username),
        map(tag_no_case("user"), |_| KeyKind::Username),
        map(tag_no_case("phone"), |_| KeyKind::Phone),
    ))(input)
}

fn token(input: &str) -> IResult<&str, String> {
    alt((
        quoted,
        map(
            take_while1(|c: char| !c.is_whitespace() && c != '\''),
            |s: &str| s.to_string(),
        ),
    ))(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        |s: &str| s.to_string(),
    )(input)
}

fn address(input: &str) -> IResult<&str, String> {
    alt((quoted, map(rest, |s: &str| s.trim().to_string())))(input)
}
