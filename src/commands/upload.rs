use futures::{future::LocalBoxFuture, FutureExt};

use super::{download::file_tail, CommandContext};
use crate::error::CommandError;

/// Source argument that opens the local file picker instead of a URL.
pub const LOCAL_FILE: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Url(String),
    LocalFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub source: UploadSource,
    /// Target path; empty means "use the source's file name".
    pub destination: String,
}

/// `src1 [-path dst1] [src2 [-path dst2]] ...`
pub fn parse(args: &str) -> Result<Vec<UploadItem>, CommandError> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let mut items = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let source = if words[i] == LOCAL_FILE {
            UploadSource::LocalFile
        } else {
            UploadSource::Url(words[i].to_string())
        };

        let mut destination = String::new();
        if i + 2 < words.len() && words[i + 1] == "-path" {
            destination = words[i + 2].to_string();
            i += 2;
        }

        items.push(UploadItem {
            source,
            destination,
        });
        i += 1;
    }

    if items.is_empty() {
        return Err(CommandError::Syntax("wrong number of arguments".to_string()));
    }
    Ok(items)
}

pub fn run(args: &str, ctx: &CommandContext) -> LocalBoxFuture<'static, Result<(), CommandError>> {
    let items = match parse(args) {
        Ok(items) => items,
        Err(e) => return futures::future::ready(Err(e)).boxed_local(),
    };

    let uploads: Vec<_> = items
        .into_iter()
        .map(|item| upload_one(item, ctx.clone()).boxed_local())
        .collect();

    async move {
        let results = futures::future::join_all(uploads).await;
        if results.len() == 1 {
            return results
                .into_iter()
                .next()
                .unwrap_or(Ok(()))
                .map_err(CommandError::Resource);
        }

        let failures: Vec<String> = results.into_iter().filter_map(Result::err).collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(CommandError::Resource(failures.join("\r\n")))
        }
    }
    .boxed_local()
}

async fn upload_one(item: UploadItem, ctx: CommandContext) -> Result<(), String> {
    let (name, data) = match &item.source {
        UploadSource::Url(url) => {
            let data = ctx.host.transfer.fetch(url).await?;
            (file_tail(url).to_string(), data)
        }
        UploadSource::LocalFile => {
            let picked = ctx.host.transfer.pick_file().await?;
            (picked.name, picked.data)
        }
    };

    let destination = if item.destination.is_empty() {
        name.clone()
    } else {
        item.destination
    };

    ctx.term.write_line(&format!(
        "uploading file '{}' of size {} bytes to '{}'...",
        name,
        data.len(),
        destination
    ));
    tracing::debug!(name = %name, destination = %destination, "upload");

    ctx.host.fs.write_file(&destination, &data)?;
    if ctx.preload {
        ctx.host
            .fs
            .preload(&destination, &data)
            .await
            .map_err(|e| format!("Preload '{}' failed: {}", destination, e))?;
    }
    Ok(())
}
