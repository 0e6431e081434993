use listing_reviewer::app::App;
use listing_reviewer::config::default_webview_data_dir;

fn main() {
    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Listing Reviewer"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
