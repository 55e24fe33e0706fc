use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use pollichat_llm_api::{find_model, random_prompt, ImageClient, ImageRequest, ImageSize, COMPARE_DELAY};
use pollichat_models::SizePreset;

use crate::app::AppConfig;
use crate::cli::ImageArgs;

/// Requested size: explicit width and height win over the preset
pub fn image_size(args: &ImageArgs) -> Result<ImageSize> {
    if let (Some(width), Some(height)) = (args.width, args.height) {
        return Ok(ImageSize::Custom { width, height });
    }

    let preset = SizePreset::from_str(&args.size)
        .with_context(|| format!("unknown size preset '{}' (use square, landscape, portrait or max)", args.size))?;
    Ok(ImageSize::Preset(preset))
}

/// Validated requests for one run: a single model, or every model when comparing
pub fn build_requests(args: &ImageArgs) -> Result<Vec<ImageRequest>> {
    let prompt = if args.random_prompt {
        random_prompt().to_string()
    } else {
        args.prompt.clone().unwrap_or_default()
    };
    let size = image_size(args)?;

    let requests = if args.compare {
        ImageRequest::for_all_models(&prompt, size, args.seed)?
    } else {
        vec![ImageRequest::new(&prompt, size, args.seed, find_model(&args.model)?)?]
    };
    Ok(requests)
}

async fn download(client: &ImageClient, request: &ImageRequest, dir: &Path) -> Result<()> {
    let bytes = client.fetch(request).await?;
    let path = dir.join(request.file_name());
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  {} {} ({} bytes)", "saved".green(), path.display(), bytes.len());
    Ok(())
}

/// `pollichat image`
pub async fn run_image_mode(args: &ImageArgs, config: &AppConfig) -> Result<()> {
    let requests = build_requests(args)?;
    let client = ImageClient::new(&config.client_config);

    if let Some(first) = requests.first() {
        println!("{} {}", "🎨 Prompt:".bright_cyan().bold(), first.prompt);
        println!(
            "{}",
            format!("   {}x{} • seed {}", first.width, first.height, first.seed).bright_black()
        );
    }

    if args.download {
        tokio::fs::create_dir_all(&args.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;
    }

    let mut failures = 0;
    for (i, request) in requests.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(COMPARE_DELAY).await;
        }

        let url = client.url_for(request)?;
        println!("{} {}", format!("{}:", request.model.name).bright_magenta().bold(), url);

        if args.download {
            // In compare mode one failing model should not stop the others
            if let Err(e) = download(&client, request, &args.output_dir).await {
                eprintln!("  {} {}: {:#}", "✗".red(), request.model.name, e);
                failures += 1;
            }
        }
    }

    match failures {
        0 => Ok(()),
        n if n == requests.len() => bail!("every image download failed"),
        n => {
            log::warn!("{} of {} downloads failed", n, requests.len());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use crate::cli::{Cli, Commands};

    fn image_args(argv: &[&str]) -> ImageArgs {
        let mut full = vec!["pollichat", "image"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Some(Commands::Image(args)) => args,
            other => panic!("expected image command, got {:?}", other),
        }
    }

    #[test]
    fn test_single_request() {
        let requests = build_requests(&image_args(&["a lighthouse", "--seed", "42", "--model", "sdxl"])).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "a lighthouse");
        assert_eq!((requests[0].width, requests[0].height), (1024, 1024));
        assert_eq!(requests[0].seed, 42);
        assert_eq!(requests[0].model.id, "sdxl");
    }

    #[test]
    fn test_compare_uses_every_model_with_one_seed() {
        let requests = build_requests(&image_args(&["a lighthouse", "--compare", "--size", "landscape"])).unwrap();
        let ids: Vec<&str> = requests.iter().map(|r| r.model.id).collect();
        assert_eq!(ids, vec!["flux", "flux-pro", "sdxl", "kandinsky", "playground"]);
        assert!(requests.iter().all(|r| r.seed == requests[0].seed));
        assert!(requests.iter().all(|r| (r.width, r.height) == (1280, 720)));
    }

    #[test]
    fn test_custom_size_is_clamped() {
        let requests = build_requests(&image_args(&["x", "--width", "4000", "--height", "300"])).unwrap();
        assert_eq!((requests[0].width, requests[0].height), (1704, 300));
    }

    #[test]
    fn test_rejections() {
        assert!(build_requests(&image_args(&["   "])).is_err());
        assert!(build_requests(&image_args(&[])).is_err());
        assert!(build_requests(&image_args(&["x", "--width", "32", "--height", "512"])).is_err());
        assert!(build_requests(&image_args(&["x", "--size", "huge"])).is_err());
        assert!(build_requests(&image_args(&["x", "--model", "dalle"])).is_err());
    }

    #[test]
    fn test_random_prompt() {
        let requests = build_requests(&image_args(&["--random-prompt"])).unwrap();
        assert!(!requests[0].prompt.is_empty());
    }
}
