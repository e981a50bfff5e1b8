//! End-to-end sequencing of the bootstrap stages.

use reqwest::Client;

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::platform::{Os, Platform};
use crate::reporter::Reporter;
use crate::{build, fetch, install, patch, preflight};

/// Run the whole pipeline: preflight, fetch/verify/extract, patch, build,
/// install, outro.
///
/// # Errors
///
/// The first failing stage aborts the run; completed stages are not rolled
/// back, so a failed build leaves the downloaded and patched tree in place
/// for the next invocation to reuse.
pub async fn run<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) -> Result<(), PipelineError> {
    preflight::check_delivery_path(workspace.delivery_dir())?;
    preflight::check_cmake(config, reporter)?;
    preflight::check_compiler(workspace, platform, reporter)?;

    let client = Client::new();
    fetch::fetch_cef(config, workspace, platform, &client, reporter).await?;
    patch::apply(config, workspace, platform, reporter)?;
    build::compile_cef(config, workspace, platform, reporter)?;
    install::install_artifacts(config, workspace, platform, reporter)?;

    outro(config, workspace, platform, reporter);
    Ok(())
}

/// Final success message with the post-install environment instructions.
fn outro<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    reporter: &R,
) {
    let delivery = workspace.delivery_dir().display();
    reporter.success(&format!(
        "Compilation done with success! Your {} has been generated into '{delivery}'",
        config.app_name
    ));

    let library = match platform.os {
        Os::Linux => "libcef.so",
        Os::MacOs => "libcef.dylib",
        Os::Windows => return,
    };
    reporter.info(&format!(
        "Your system needs to know where to find the shared libraries CEF uses. \
         Save the following commands in your environment (~/.bashrc i.e.):\n\n   \
         export LD_LIBRARY_PATH=$LD_LIBRARY_PATH:{delivery}\n   \
         export LD_PRELOAD={delivery}/{library}\n"
    ));
}
