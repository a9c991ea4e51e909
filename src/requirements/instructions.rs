//! Setup instructions shown for missing requirements.
//!
//! Plain text with numbered steps, tailored to the platform where the
//! install route differs.

use crate::environment::Platform;

fn steps(title: &str, items: &[&str]) -> String {
    let mut text = format!("{}\n", title);
    for (i, item) in items.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, item));
    }
    text
}

pub fn git(platform: Platform) -> String {
    match platform {
        Platform::Windows => steps(
            "Install Git on Windows:",
            &[
                "Download Git from https://git-scm.com/download/win",
                "Run the installer and follow the setup wizard",
                "Open Command Prompt or PowerShell and verify: git --version",
            ],
        ),
        Platform::MacOS => steps(
            "Install Git on macOS:",
            &[
                "Install via Homebrew: brew install git",
                "Or download from https://git-scm.com/download/mac",
                "Verify installation: git --version",
            ],
        ),
        Platform::Linux => steps(
            "Install Git on Linux:",
            &[
                "Ubuntu/Debian: sudo apt-get install git",
                "Fedora/RHEL: sudo dnf install git",
                "Verify installation: git --version",
            ],
        ),
    }
}

pub fn node(platform: Platform) -> String {
    let manager = match platform {
        Platform::Windows => "Or use nvm-windows: https://github.com/coreybutler/nvm-windows",
        Platform::MacOS | Platform::Linux => {
            "Or use nvm: https://github.com/nvm-sh/nvm, then nvm install --lts"
        }
    };
    steps(
        "Install Node.js:",
        &[
            "Download the LTS release from https://nodejs.org/",
            manager,
            "Verify installation: node --version",
        ],
    )
}

pub fn npm(_platform: Platform) -> String {
    steps(
        "npm comes with Node.js:",
        &[
            "Install Node.js first",
            "npm is included automatically",
            "Verify installation: npm --version",
        ],
    )
}

pub fn composer(platform: Platform) -> String {
    match platform {
        Platform::Windows => steps(
            "Install Composer on Windows:",
            &[
                "Download Composer-Setup.exe from https://getcomposer.org/download/",
                "Run the installer and point it at your PHP binary",
                "Verify installation: composer --version",
            ],
        ),
        Platform::MacOS => steps(
            "Install Composer on macOS:",
            &[
                "Install via Homebrew: brew install composer",
                "Or follow https://getcomposer.org/download/",
                "Verify installation: composer --version",
            ],
        ),
        Platform::Linux => steps(
            "Install Composer on Linux:",
            &[
                "Follow the command-line install at https://getcomposer.org/download/",
                "Move composer.phar to /usr/local/bin/composer",
                "Verify installation: composer --version",
            ],
        ),
    }
}

pub fn git_repository(_platform: Platform) -> String {
    steps(
        "Initialize a Git repository:",
        &[
            "Navigate to your WordPress directory",
            "Run: git init",
            "Or clone WordPress develop: git clone https://github.com/WordPress/wordpress-develop.git",
        ],
    )
}

pub fn wp_repo(_platform: Platform) -> String {
    let mut text = steps(
        "Set up the WordPress development repository:",
        &[
            "Clone the repository: git clone https://github.com/WordPress/wordpress-develop.git",
            "Navigate to the directory: cd wordpress-develop",
            "Install dependencies: npm install",
            "Build the site: npm run build:dev",
        ],
    );
    text.push_str("Git workflow guide: https://make.wordpress.org/core/handbook/contribute/git/\n");
    text
}

pub fn gutenberg(_platform: Platform) -> String {
    steps(
        "Install the Gutenberg plugin:",
        &[
            "In WordPress admin go to Plugins > Add New",
            "Search for \"Gutenberg\"",
            "Install and activate the plugin",
            "Or download from https://wordpress.org/plugins/gutenberg/",
        ],
    )
}

pub fn git_extensions(_platform: Platform) -> String {
    steps(
        "Clone a plugin or theme:",
        &[
            "cd wp-content/plugins (or wp-content/themes)",
            "git clone <repository-url>",
            "Activate it from the WordPress admin",
        ],
    )
}

pub fn wporg_account(_platform: Platform) -> String {
    steps(
        "Connect your WordPress.org account:",
        &[
            "Register at https://login.wordpress.org/register if you don't have an account",
            "Save your username: wpready account verify <username>",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_instructions_follow_platform() {
        assert!(git(Platform::MacOS).contains("brew install git"));
        assert!(git(Platform::Linux).contains("apt-get"));
        assert!(git(Platform::Windows).contains("git-scm.com/download/win"));
    }

    #[test]
    fn steps_are_numbered() {
        let text = npm(Platform::Linux);
        assert!(text.starts_with("npm comes with Node.js:"));
        assert!(text.contains("  1. "));
        assert!(text.contains("  3. Verify installation: npm --version"));
    }

    #[test]
    fn wp_repo_links_git_guide() {
        assert!(wp_repo(Platform::MacOS).contains("make.wordpress.org/core/handbook"));
    }
}
