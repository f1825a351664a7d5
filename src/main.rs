// ============================================================================
// LazyCoin - Visionneuse de cryptomonnaies dans le terminal
// ============================================================================
// Programme TUI : catalogue de monnaies, vue détail avec variations de prix
// et graphique historique, thème sombre/clair
//
// Architecture :
// 1. Event loop synchrone : render -> input -> drain des résultats
// 2. Worker thread : exécute les appels API async (tokio) sans bloquer l'UI
// 3. Communication par channels mpsc (commandes / résultats)
// 4. Cache de requêtes par clé : un fetch par clé, résultats conservés
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazycoin::api::{fetch_coin_history, fetch_coin_info, fetch_coin_tickers, fetch_coins};
use lazycoin::app::{App, DetailTab};
use lazycoin::query::{QueryKey, QueryPayload};
use lazycoin::ui::{events::EventHandler, render};

// ============================================================================
// AppCommand / AppResult : protocole du worker thread
// ============================================================================
// L'event loop envoie des commandes, le worker exécute les fetchs async et
// renvoie chaque résultat accompagné de sa clé d'origine. C'est cette clé
// qui décide où le résultat atterrit dans le cache : une réponse tardive
// pour une monnaie abandonnée ne peut pas toucher la vue active.
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Exécuter le fetch correspondant à une clé de cache
    Fetch(QueryKey),
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Fetch terminé, succès ou échec, sous sa clé d'origine
    Fetched {
        key: QueryKey,
        result: std::result::Result<QueryPayload, String>,
    },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
//
// Les logs sont écrits dans :
// - Linux/WSL : ~/.local/share/lazycoin/logs/lazycoin.log
// - macOS : ~/Library/Application Support/lazycoin/logs/lazycoin.log
// - Windows : C:\Users\<user>\AppData\Local\lazycoin\logs\lazycoin.log
// (repli sur ./logs si le répertoire utilisateur est introuvable)
//
// # Utilisation
// ```bash
// tail -f ~/.local/share/lazycoin/logs/lazycoin.log
// RUST_LOG=lazycoin=trace cargo run
// ```
// ============================================================================

/// Répertoire des logs, résolu via dirs (cross-platform)
fn log_directory() -> std::path::PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazycoin").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Rotation quotidienne : lazycoin.log.2026-08-07, etc.
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazycoin.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG=debug : tous les logs debug+
            // RUST_LOG=lazycoin=trace : trace pour lazycoin, info pour le reste
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazycoin=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Logging en premier : si l'init échoue on continue sans logs
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyCoin starting up");

    // Setup du terminal en mode TUI
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // État partagé entre l'event loop et la closure de rendu
    let app = Arc::new(Mutex::new(App::new()));

    // Channels de communication avec le worker
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    // Lance le worker thread en arrière-plan
    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx);

    // Montage du listing : émet le fetch du catalogue, la vue affiche son
    // indicateur de chargement tant que la réponse n'est pas arrivée
    {
        let to_fetch = app.lock().unwrap().mount_listing();
        dispatch_fetches(&command_tx, to_fetch);
    }

    // Exécute l'event loop
    let events = EventHandler::new();
    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Envoie une commande Fetch par clé à émettre
fn dispatch_fetches(command_tx: &mpsc::Sender<AppCommand>, keys: Vec<QueryKey>) {
    for key in keys {
        info!(key = %key.describe(), "Dispatching fetch");
        let _ = command_tx.send(AppCommand::Fetch(key));
    }
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// Thread séparé qui possède son runtime tokio. Chaque commande est lancée
// comme une tâche : les deux fetchs d'une même monnaie (métadonnées et
// ticker) volent en parallèle, et aucun fetch ne bloque ni l'UI ni les
// commandes suivantes.
// ============================================================================

/// Worker thread qui exécute les fetchs API en arrière-plan
fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        loop {
            match command_rx.recv() {
                Ok(AppCommand::Fetch(key)) => {
                    info!(key = %key.describe(), "Worker received fetch command");

                    let tx = result_tx.clone();
                    runtime.spawn(async move {
                        let result = run_fetch(&key).await;

                        match &result {
                            Ok(_) => info!(key = %key.describe(), "Fetch succeeded"),
                            Err(e) => error!(key = %key.describe(), error = %e, "Fetch failed"),
                        }

                        let _ = tx.send(AppResult::Fetched { key, result });
                    });
                }
                Err(_) => {
                    // Channel fermé : l'event loop s'est arrêté
                    info!("Worker thread exiting (channel closed)");
                    break;
                }
            }
        }
    });
}

/// Exécute le fetch correspondant à une clé
///
/// Les erreurs sont aplaties en String : le cache n'a besoin que du
/// message pour son état Failed.
async fn run_fetch(key: &QueryKey) -> std::result::Result<QueryPayload, String> {
    match key {
        QueryKey::Coins => fetch_coins()
            .await
            .map(QueryPayload::Coins)
            .map_err(|e| e.to_string()),
        QueryKey::Info(coin_id) => fetch_coin_info(coin_id)
            .await
            .map(QueryPayload::Info)
            .map_err(|e| e.to_string()),
        QueryKey::Tickers(coin_id) => fetch_coin_tickers(coin_id)
            .await
            .map(QueryPayload::Tickers)
            .map_err(|e| e.to_string()),
        QueryKey::History(coin_id, interval) => fetch_coin_history(coin_id, *interval)
            .await
            .map(QueryPayload::History)
            .map_err(|e| e.to_string()),
    }
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// Loop infinie : drain des résultats -> render -> input. Pattern classique
// des applications interactives.
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        // Lock minimal : juste le temps de lire is_running
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // ========================================
        // 0. RÉSULTATS : draine tout ce que le worker a produit
        // ========================================
        // try_recv ne bloque pas ; chaque résultat est admis dans le cache
        // sous sa clé d'origine, jamais sous la route courante
        while let Ok(AppResult::Fetched { key, result }) = result_rx.try_recv() {
            let mut app_lock = app.lock().unwrap();
            debug!(key = %key.describe(), ok = result.is_ok(), "Settling fetch result");
            app_lock.cache.settle(key, result);
        }

        // ========================================
        // 1. RENDER : dessine l'écran actif
        // ========================================
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &app_lock);
            })?;
        }

        // ========================================
        // 2. INPUT : traite le prochain événement
        // ========================================
        if let Ok(event) = events.next() {
            let mut app_lock = app.lock().unwrap();
            handle_event(&mut app_lock, event, &command_tx);
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// Pattern matching avec guards : chaque touche est filtrée par l'écran où
// elle a un sens. Les méthodes de navigation de App retournent les clés
// dont le fetch doit partir ; on les transforme ici en commandes worker.
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: lazycoin::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycoin::ui::events::{
        is_chart_tab_event, is_down_event, is_enter_event, is_escape_event,
        is_next_interval_event, is_previous_interval_event, is_price_tab_event, is_quit_event,
        is_refresh_event, is_theme_toggle_event, is_up_event, Event,
    };

    match event {
        // 'q' : quit en deux temps
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // 't' : bascule du thème, disponible sur toutes les vues
        Event::Key(_) if is_theme_toggle_event(&event) => {
            app.cancel_quit();
            app.toggle_theme();
            info!(dark = app.theme.is_dark(), "User toggled theme");
        }

        // 'r' : refetch de la vue courante
        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            info!("User requested refresh");
            let to_fetch = app.refresh_current();
            dispatch_fetches(command_tx, to_fetch);
        }

        // Navigation dans le listing
        Event::Key(_) if is_up_event(&event) && app.is_on_listing() => {
            app.cancel_quit();
            debug!("User navigated up");
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_listing() => {
            app.cancel_quit();
            debug!("User navigated down");
            app.navigate_down();
        }

        // Enter : ouvre le détail de la monnaie sélectionnée
        // Le nom d'affichage part en routing state avec la navigation
        Event::Key(_) if is_enter_event(&event) && app.is_on_listing() => {
            app.cancel_quit();
            let to_fetch = app.open_selected();
            if let Some(coin_id) = app.current_coin_id() {
                info!(coin = %coin_id, "User opened coin detail");
            }
            dispatch_fetches(command_tx, to_fetch);
        }

        // ESC : retour au listing depuis le détail
        Event::Key(_) if is_escape_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            debug!("User returned to listing");
            app.back_to_listing();
        }

        // 'p' / 'c' : sous-vues exclusives de la vue détail
        Event::Key(_) if is_price_tab_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            info!("User selected price tab");
            let to_fetch = app.select_tab(DetailTab::Price);
            dispatch_fetches(command_tx, to_fetch);
        }
        Event::Key(_) if is_chart_tab_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            info!("User selected chart tab");
            let to_fetch = app.select_tab(DetailTab::Chart);
            dispatch_fetches(command_tx, to_fetch);
        }

        // 'h' / 'l' : intervalle du graphique (onglet Chart uniquement)
        Event::Key(_)
            if is_next_interval_event(&event)
                && app.current_tab() == Some(DetailTab::Chart) =>
        {
            app.cancel_quit();
            let to_fetch = app.next_interval();
            info!(interval = %app.chart_interval.label(), "User changed to next interval");
            dispatch_fetches(command_tx, to_fetch);
        }
        Event::Key(_)
            if is_previous_interval_event(&event)
                && app.current_tab() == Some(DetailTab::Chart) =>
        {
            app.cancel_quit();
            let to_fetch = app.previous_interval();
            info!(interval = %app.chart_interval.label(), "User changed to previous interval");
            dispatch_fetches(command_tx, to_fetch);
        }

        Event::Tick => {
            // Tick régulier : rien à faire, le drain des résultats se
            // charge des mises à jour
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// Raw mode + alternate screen. IMPORTANT : toujours restaurer le terminal
// avant de quitter, même en cas d'erreur.
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;
    Ok(())
}
