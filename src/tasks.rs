//! Built-in Fedora post-install tasks

use setupkit::{Category, Step, Task, TaskKind};
use std::path::PathBuf;

const RPMFUSION_FREE: &str =
    "https://mirrors.rpmfusion.org/free/fedora/rpmfusion-free-release-$(rpm -E %fedora).noarch.rpm";
const RPMFUSION_NONFREE: &str = "https://mirrors.rpmfusion.org/nonfree/fedora/rpmfusion-nonfree-release-$(rpm -E %fedora).noarch.rpm";
const FLATHUB_REPO: &str = "https://flathub.org/repo/flathub.flatpakrepo";
const MICROSOFT_KEY: &str = "https://packages.microsoft.com/keys/microsoft.asc";
const VSCODE_REPO: &str = "'[code]\\nname=Visual Studio Code\\nbaseurl=https://packages.microsoft.com/yumrepos/vscode\\nenabled=1\\ngpgcheck=1\\ngpgkey=https://packages.microsoft.com/keys/microsoft.asc\\n'";

/// The default task table
pub fn builtin() -> Vec<Category> {
    vec![
        Category::new(
            "1. Essentials (Must-Do)",
            vec![
                Task::new(
                    "1",
                    "Run Full System Update (dnf upgrade)",
                    TaskKind::SystemUpgrade {
                        query: Step::exec(["dnf", "check-update", "--refresh"]),
                        steps: vec![Step::exec(["dnf", "upgrade", "--refresh", "-y"])],
                    },
                ),
                Task::new(
                    "2",
                    "Enable RPM Fusion Repos (Free & Non-Free)",
                    TaskKind::FileExists {
                        path: PathBuf::from("/etc/yum.repos.d/rpmfusion-free.repo"),
                        steps: vec![Step::shell([
                            "dnf",
                            "install",
                            "-y",
                            RPMFUSION_FREE,
                            RPMFUSION_NONFREE,
                        ])],
                    },
                ),
                Task::new(
                    "3",
                    "Apply Common DNF Tweaks (fastestmirror, parallel, deltarpm)",
                    TaskKind::ConfigLines {
                        path: PathBuf::from("/etc/dnf/dnf.conf"),
                        lines: lines(&[
                            "max_parallel_downloads=10",
                            "fastestmirror=True",
                            "deltarpm=True",
                        ]),
                    },
                ),
                Task::new(
                    "4",
                    "Enable Flathub Repository",
                    TaskKind::CommandOutput {
                        probe: Step::exec(["flatpak", "remotes"]),
                        needle: "flathub".to_string(),
                        steps: vec![Step::exec([
                            "flatpak",
                            "remote-add",
                            "--if-not-exists",
                            "flathub",
                            FLATHUB_REPO,
                        ])],
                    },
                ),
            ],
        ),
        Category::new(
            "2. Multimedia & Drivers",
            vec![
                Task::new(
                    "5",
                    "Install Multimedia Codecs (gstreamer, ffmpeg)",
                    TaskKind::Packages {
                        packages: lines(&[
                            "gstreamer1-plugins-bad-freeworld",
                            "gstreamer1-plugins-ugly",
                            "ffmpeg",
                        ]),
                        steps: vec![
                            Step::exec(["dnf", "swap", "ffmpeg-free", "ffmpeg", "--allowerasing", "-y"]),
                            Step::exec([
                                "dnf",
                                "groupupdate",
                                "multimedia",
                                "--setop=install_weak_deps=False",
                                "--exclude=PackageKit-gstreamer-plugin",
                                "-y",
                            ]),
                            Step::exec(["dnf", "groupupdate", "sound-and-video", "-y"]),
                        ],
                    },
                ),
                dnf_install(
                    "6",
                    "Install Proprietary NVIDIA Drivers",
                    &["akmod-nvidia", "xorg-x11-drv-nvidia-cuda"],
                ),
                dnf_install("7", "Install VLC Media Player", &["vlc"]),
            ],
        ),
        Category::new(
            "3. GNOME & Utilities",
            vec![
                dnf_install("8", "Install GNOME Tweaks", &["gnome-tweaks"]),
                Task::new(
                    "9",
                    "Install 'Extension Manager' (from Flathub)",
                    TaskKind::Flatpak {
                        app_id: "com.mattjakeman.ExtensionManager".to_string(),
                        steps: vec![Step::exec([
                            "flatpak",
                            "install",
                            "flathub",
                            "com.mattjakeman.ExtensionManager",
                            "-y",
                        ])],
                    },
                ),
                Task::new(
                    "10",
                    "Enable Window Minimize & Maximize Buttons",
                    TaskKind::CommandOutput {
                        probe: Step::exec([
                            "gsettings",
                            "get",
                            "org.gnome.desktop.wm.preferences",
                            "button-layout",
                        ]),
                        needle: "min,max,close".to_string(),
                        steps: vec![Step::exec([
                            "gsettings",
                            "set",
                            "org.gnome.desktop.wm.preferences",
                            "button-layout",
                            "appmenu:min,max,close",
                        ])],
                    },
                ),
                dnf_install("11", "Install System Backup Tool (Timeshift)", &["timeshift"]),
                dnf_install("12", "Install Advanced System Monitor (btop)", &["btop"]),
                dnf_install("13", "Install EasyEffects (Audio Post-Processing)", &["easyeffects"]),
            ],
        ),
        Category::new(
            "4. Power-User & Laptop Tools",
            vec![
                Task::new(
                    "14",
                    "Install TLP (Laptop Battery Optimization)",
                    TaskKind::Packages {
                        packages: lines(&["tlp", "tlp-rdw"]),
                        steps: vec![
                            Step::exec(["dnf", "install", "-y", "tlp", "tlp-rdw"]),
                            Step::exec(["systemctl", "mask", "power-profiles-daemon"]),
                            Step::exec(["systemctl", "enable", "--now", "tlp"]),
                        ],
                    },
                ),
                Task::new(
                    "15",
                    "Install Preload (Faster App Launching)",
                    TaskKind::Packages {
                        packages: lines(&["preload"]),
                        steps: vec![
                            Step::exec(["dnf", "install", "-y", "preload"]),
                            Step::exec(["systemctl", "enable", "--now", "preload"]),
                        ],
                    },
                ),
            ],
        ),
        Category::new(
            "5. Developer Setup",
            vec![
                Task::new(
                    "16",
                    "Install 'Development Tools' Group (gcc, make, etc.)",
                    TaskKind::Group {
                        group: "Development Tools".to_string(),
                        steps: vec![Step::exec(["dnf", "groupinstall", "-y", "Development Tools"])],
                    },
                ),
                Task::new(
                    "17",
                    "Install Visual Studio Code (Microsoft Repo)",
                    TaskKind::Packages {
                        packages: lines(&["code"]),
                        steps: vec![
                            Step::exec(["rpm", "--import", MICROSOFT_KEY]),
                            Step::shell(["printf", VSCODE_REPO, ">", "/etc/yum.repos.d/vscode.repo"]),
                            Step::exec(["dnf", "makecache"]),
                            Step::exec(["dnf", "install", "-y", "code"]),
                        ],
                    },
                ),
            ],
        ),
    ]
}

/// A package task whose only step installs the packages
fn dnf_install(id: &str, description: &str, packages: &[&str]) -> Task {
    let mut argv = vec!["dnf", "install", "-y"];
    argv.extend_from_slice(packages);

    Task::new(
        id,
        description,
        TaskKind::Packages {
            packages: lines(packages),
            steps: vec![Step::exec(argv)],
        },
    )
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
