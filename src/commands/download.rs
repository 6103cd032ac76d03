use super::CommandContext;
use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source: String,
    pub file_name: String,
}

/// `<source> [file name]`; the file name defaults to the last path
/// component of the source.
pub fn parse(args: &str) -> Result<DownloadRequest, CommandError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let (source, file_name) = match parts.as_slice() {
        [source] => (*source, file_tail(source)),
        [source, name] => (*source, *name),
        _ => {
            return Err(CommandError::Syntax(
                "wrong number of arguments".to_string(),
            ))
        }
    };

    Ok(DownloadRequest {
        source: source.to_string(),
        file_name: file_name.to_string(),
    })
}

pub fn file_tail(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn mime_type(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

pub fn run(args: &str, ctx: &CommandContext) -> Result<(), CommandError> {
    let request = parse(args)?;
    let data = ctx.host.fs.read_file(&request.source).map_err(|e| {
        CommandError::Resource(format!(
            "Error: file '{}' cannot be read with {}",
            request.source, e
        ))
    })?;

    ctx.term.write_line(&format!(
        "downloading file '{}' of size {} bytes...",
        request.file_name,
        data.len()
    ));
    tracing::debug!(source = %request.source, name = %request.file_name, "download");

    ctx.host
        .transfer
        .save(&data, &request.file_name, mime_type(&request.source))
        .map_err(CommandError::Resource)
}
