//! services/web/src/adapters/games.rs
//!
//! This module contains the game-API adapter, the concrete implementation
//! of the `GameService` port from the `core` crate. It translates port
//! calls into SOAP requests and normalizes the remote's two failure shapes
//! (the boolean `false` sentinel and transport faults) into `ApiError`.

use std::sync::Arc;

use async_trait::async_trait;
use wishlist_core::domain::{Game, GameStatus};
use wishlist_core::ports::{ApiError, ApiResult, GameService};
use wishlist_core::sanitize;

use crate::adapters::soap::{GameRecord, SoapFault, SoapReturn, SoapTransport};

/// Remote method names.
const METHOD_CHECK_KEY: &str = "checkKey";
const METHOD_GET_GAMES: &str = "getGames";
const METHOD_ADD_VOTE: &str = "addVote";
const METHOD_ADD_GAME: &str = "addGame";
const METHOD_SET_GOT_IT: &str = "setGotIt";
const METHOD_CLEAR_GAMES: &str = "clearGames";

impl From<SoapFault> for ApiError {
    fn from(fault: SoapFault) -> Self {
        ApiError::Transport {
            code: fault.code,
            message: fault.message,
        }
    }
}

impl GameRecord {
    /// Convert a wire record into a domain `Game`, reversing the storage
    /// escaping the remote applies to titles.
    fn to_domain(self) -> Game {
        Game {
            id: self.id,
            title: sanitize::reverse_for_database(&self.title),
            votes: self.votes,
            status: GameStatus::from_wire(&self.status),
            ip: self.ip,
            vote_time: self.votetime,
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `GameService` port against the remote
/// SOAP endpoint. Every call carries the api key.
pub struct SoapGameAdapter {
    transport: Arc<dyn SoapTransport>,
    api_key: String,
}

impl std::fmt::Debug for SoapGameAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoapGameAdapter").finish_non_exhaustive()
    }
}

impl SoapGameAdapter {
    /// Creates the adapter and validates the api key in one step, so
    /// connectivity is proven once and the key never needs re-checking.
    ///
    /// Fails with `ApiError::InvalidApiKey` if the remote rejects the key;
    /// the owning process should refuse to serve.
    pub async fn connect(
        transport: Arc<dyn SoapTransport>,
        api_key: impl Into<String>,
    ) -> ApiResult<Self> {
        let adapter = Self {
            transport,
            api_key: api_key.into(),
        };
        if !adapter.check_key().await? {
            return Err(ApiError::InvalidApiKey);
        }
        Ok(adapter)
    }

    /// The api key plus any operation-specific parameters, key first.
    fn params<'a>(&self, extra: Vec<(&'a str, String)>) -> Vec<(&'a str, String)> {
        let mut params = vec![("apiKey", self.api_key.clone())];
        params.extend(extra);
        params
    }

    /// Run a mutation that acknowledges with `true` and signals failure
    /// with the `false` sentinel.
    async fn expect_ack(&self, method: &str, extra: Vec<(&str, String)>) -> ApiResult<()> {
        match self.transport.call(method, &self.params(extra)).await? {
            SoapReturn::Boolean(true) => Ok(()),
            // `false`, or any payload other than the expected ack.
            _ => Err(ApiError::InvalidId),
        }
    }
}

//=========================================================================================
// `GameService` Trait Implementation
//=========================================================================================

#[async_trait]
impl GameService for SoapGameAdapter {
    async fn check_key(&self) -> ApiResult<bool> {
        match self
            .transport
            .call(METHOD_CHECK_KEY, &self.params(Vec::new()))
            .await?
        {
            SoapReturn::Boolean(valid) => Ok(valid),
            SoapReturn::Records(_) => Err(ApiError::Transport {
                code: "Client".to_string(),
                message: "unexpected checkKey payload".to_string(),
            }),
        }
    }

    async fn games(&self) -> ApiResult<Vec<Game>> {
        match self
            .transport
            .call(METHOD_GET_GAMES, &self.params(Vec::new()))
            .await?
        {
            SoapReturn::Records(records) => {
                Ok(records.into_iter().map(GameRecord::to_domain).collect())
            }
            // The game list comes back as records or the failure sentinel.
            SoapReturn::Boolean(_) => Err(ApiError::InvalidId),
        }
    }

    async fn add_vote(&self, id: i64) -> ApiResult<()> {
        self.expect_ack(METHOD_ADD_VOTE, vec![("id", id.to_string())])
            .await
    }

    async fn add_game(&self, title: &str) -> ApiResult<()> {
        let title = sanitize::for_database(title);
        self.expect_ack(METHOD_ADD_GAME, vec![("title", title)])
            .await
    }

    async fn set_owned(&self, id: i64) -> ApiResult<()> {
        self.expect_ack(METHOD_SET_GOT_IT, vec![("id", id.to_string())])
            .await
    }

    async fn clear_games(&self) -> ApiResult<()> {
        self.expect_ack(METHOD_CLEAR_GAMES, Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport stub that replays canned responses and records every call.
    struct StubTransport {
        responses: Mutex<VecDeque<Result<SoapReturn, SoapFault>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubTransport {
        fn new(responses: Vec<Result<SoapReturn, SoapFault>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SoapTransport for StubTransport {
        async fn call(
            &self,
            method: &str,
            params: &[(&str, String)],
        ) -> Result<SoapReturn, SoapFault> {
            self.calls.lock().unwrap().push((
                method.to_string(),
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra call")
        }
    }

    fn ok_key() -> Result<SoapReturn, SoapFault> {
        Ok(SoapReturn::Boolean(true))
    }

    fn record(id: i64, title: &str, votes: i64, status: &str) -> GameRecord {
        GameRecord {
            id,
            title: title.to_string(),
            votes,
            status: status.to_string(),
            ip: String::new(),
            votetime: String::new(),
        }
    }

    #[tokio::test]
    async fn connect_checks_the_key_once() {
        let transport = StubTransport::new(vec![ok_key()]);
        let adapter = SoapGameAdapter::connect(transport.clone(), "secret")
            .await
            .unwrap();
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "checkKey");
        assert_eq!(calls[0].1, vec![("apiKey".to_string(), "secret".to_string())]);
        drop(adapter);
    }

    #[tokio::test]
    async fn connect_fails_on_rejected_key() {
        let transport = StubTransport::new(vec![Ok(SoapReturn::Boolean(false))]);
        let err = SoapGameAdapter::connect(transport, "bad-key")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidApiKey));
    }

    #[tokio::test]
    async fn false_sentinel_becomes_invalid_id() {
        let transport = StubTransport::new(vec![ok_key(), Ok(SoapReturn::Boolean(false))]);
        let adapter = SoapGameAdapter::connect(transport, "secret").await.unwrap();
        let err = adapter.add_vote(42).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidId));
        assert_eq!(err.to_string(), "The id is invalid");
    }

    #[tokio::test]
    async fn faults_become_transport_errors_with_code_and_message() {
        let fault = SoapFault {
            code: "HTTP".to_string(),
            message: "could not connect to host".to_string(),
        };
        let transport = StubTransport::new(vec![ok_key(), Err(fault)]);
        let adapter = SoapGameAdapter::connect(transport, "secret").await.unwrap();
        let err = adapter.games().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not connect to host with error code HTTP"
        );
    }

    #[tokio::test]
    async fn games_unescapes_titles_and_parses_status() {
        let records = vec![
            record(1, r"it\'s Halo", 3, "wantit"),
            record(2, "Forza", 0, "gotit"),
        ];
        let transport = StubTransport::new(vec![ok_key(), Ok(SoapReturn::Records(records))]);
        let adapter = SoapGameAdapter::connect(transport, "secret").await.unwrap();

        let games = adapter.games().await.unwrap();
        assert_eq!(games[0].title, "it's Halo");
        assert_eq!(games[0].status, GameStatus::Wanted);
        assert_eq!(games[1].status, GameStatus::Owned);
    }

    #[tokio::test]
    async fn games_rejects_boolean_payloads() {
        let transport = StubTransport::new(vec![ok_key(), Ok(SoapReturn::Boolean(false))]);
        let adapter = SoapGameAdapter::connect(transport, "secret").await.unwrap();
        assert!(matches!(
            adapter.games().await.unwrap_err(),
            ApiError::InvalidId
        ));
    }

    #[tokio::test]
    async fn add_game_escapes_the_title_for_storage() {
        let transport = StubTransport::new(vec![ok_key(), Ok(SoapReturn::Boolean(true))]);
        let adapter = SoapGameAdapter::connect(transport.clone(), "secret")
            .await
            .unwrap();
        adapter.add_game("it's Halo").await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[1].0, "addGame");
        assert_eq!(
            calls[1].1,
            vec![
                ("apiKey".to_string(), "secret".to_string()),
                ("title".to_string(), r"it\'s Halo".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn mutations_send_ids_with_the_key() {
        let transport = StubTransport::new(vec![
            ok_key(),
            Ok(SoapReturn::Boolean(true)),
            Ok(SoapReturn::Boolean(true)),
        ]);
        let adapter = SoapGameAdapter::connect(transport.clone(), "secret")
            .await
            .unwrap();
        adapter.set_owned(7).await.unwrap();
        adapter.clear_games().await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[1].0, "setGotIt");
        assert_eq!(calls[1].1[1], ("id".to_string(), "7".to_string()));
        assert_eq!(calls[2].0, "clearGames");
        assert_eq!(calls[2].1.len(), 1); // just the key
    }
}
