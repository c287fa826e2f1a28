use clap::Parser;
use curse_upload::utils::logger;
use curse_upload::{CliArgs, CliContext, UploadError, Uploader};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting curse-upload");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", redacted(&args));
    }

    let context = match CliContext::from_args(&args) {
        Ok(context) => context,
        Err(e) => fail(e),
    };

    let uploader = Uploader::new();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be uploaded");
        match uploader.prepare(&context).await {
            Ok(request) => {
                println!("Would POST {}", request.url);
                for (name, value) in &request.fields {
                    println!("  {} = {}", name, value);
                }
                println!(
                    "  file = {} ({} bytes)",
                    request.attachment.file_name,
                    request.attachment.content.len()
                );
            }
            Err(e) => fail(e),
        }
        return;
    }

    match uploader.run(&context).await {
        Ok(outcome) if outcome.is_success() => {
            println!("✅ {}", outcome);
        }
        Ok(outcome) => {
            eprintln!("❌ {}", outcome);
            std::process::exit(outcome.exit_code());
        }
        Err(e) => fail(e),
    }
}

fn fail(e: UploadError) -> ! {
    tracing::error!("❌ Upload failed: {}", e);
    eprintln!("❌ {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn redacted(args: &CliArgs) -> CliArgs {
    let mut args = args.clone();
    if args.api_key.is_some() {
        args.api_key = Some("<redacted>".to_string());
    }
    args
}
