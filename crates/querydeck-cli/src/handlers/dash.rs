//! Interactive dashboard.
//!
//! The renderer runs on the main thread and owns the session; one worker
//! thread executes network jobs sequentially and reports ticketed
//! completions back over a channel. The session discards completions whose
//! ticket is no longer current, so abandoning a flow (disconnect, resubmit)
//! needs no cancellation machinery.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Result;
use is_terminal::IsTerminal;

use querydeck_client::BackendClient;
use querydeck_runtime::{Config, Session};

use crate::args::ConnectionArgs;
use crate::presentation::renderers::tui::{Completion, DashRenderer, Job};

pub fn handle(client: BackendClient, config: &Config, args: &ConnectionArgs) -> Result<()> {
    anyhow::ensure!(
        std::io::stdout().is_terminal(),
        "the dashboard needs an interactive terminal; use 'querydeck query' for scripted output"
    );

    let connection = args.resolve(config)?;

    let (job_tx, job_rx) = mpsc::channel();
    let (completion_tx, completion_rx) = mpsc::channel();
    let worker = thread::spawn(move || run_worker(client, job_rx, completion_tx));

    let mut session = Session::new();
    let ticket = session.begin_connect(connection.clone())?;
    job_tx.send(Job::Connect(connection.clone(), ticket))?;

    let renderer = DashRenderer::new(session, connection, job_tx);
    let result = renderer.run(completion_rx);

    // renderer dropped its job sender, so the worker loop has ended
    if let Err(e) = worker.join() {
        eprintln!("worker thread panicked: {:?}", e);
    }
    result
}

fn run_worker(client: BackendClient, jobs: Receiver<Job>, out: Sender<Completion>) {
    for job in jobs {
        let completion = match job {
            Job::Connect(config, ticket) => Completion::Connect(ticket, client.connect(&config)),
            Job::Query(config, question, ticket) => {
                Completion::Query(ticket, client.query(&config, &question))
            }
            Job::RefreshSchema(config) => Completion::Schema(client.refresh_schema(&config)),
        };
        if out.send(completion).is_err() {
            break;
        }
    }
}
