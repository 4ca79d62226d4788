//! `lifepoop-auth` 바이너리 진입점.

use lifepoop_auth::application::binding::ViewType;
use lifepoop_auth::application::usecases::SignInOutcome;
use lifepoop_auth::application::viewmodels::LoginViewModel;
use lifepoop_auth::domain::credential::ProviderId;
use lifepoop_auth::interface::cli::{AppComposition, Cli, CliAction};

/// 셸 관례상 사용자 중단(SIGINT)을 뜻하는 종료 코드.
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Login(provider) => {
            let code = run_login(&composition, provider).await;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
}

async fn run_login(composition: &AppComposition, provider: ProviderId) -> i32 {
    let config = match composition.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return 1;
        }
    };

    let manager = composition.build_session_manager(&config);
    // 초기화 실패는 로그인 시도에서 NotInitialized로 드러난다.
    composition
        .initialize_providers_usecase(&manager)
        .execute(&config);

    let view_model = LoginViewModel::spawn(manager);
    let mut view = composition.login_view();
    view.bind(&view_model);

    match composition.sign_in_usecase(&view_model).execute(provider).await {
        Ok(SignInOutcome::SignedIn(credential)) => {
            let rendered = serde_json::json!({
                "provider": credential.provider(),
                "access_token": credential.access_token(),
            });
            println!("{rendered}");
            0
        }
        Ok(SignInOutcome::Failed(err)) if err.is_user_cancelled() => EXIT_CANCELLED,
        Ok(SignInOutcome::Failed(err)) => {
            eprintln!("error: {err}");
            1
        }
        Ok(SignInOutcome::Dismissed) => EXIT_CANCELLED,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}
