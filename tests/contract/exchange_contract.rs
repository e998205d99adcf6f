use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use railcheck_core::adapters::{BITGET_COINS_URL, GATEIO_CURRENCIES_URL, KUCOIN_CURRENCIES_URL};
use railcheck_core::{
    BitgetAdapter, CoinTicker, ExchangeAdapter, ExchangeId, GateioAdapter, HttpError,
    HttpResponse, KucoinAdapter, LookupErrorKind, LookupOutcome, StaticHttpClient,
};

const GATEIO_LISTING: &str = r#"[
    {"currency": "BTC", "deposit_disabled": false, "withdraw_disabled": false, "withdraw_delayed": false,
     "chains": [{"name": "BTC", "deposit_disabled": false, "withdraw_disabled": false, "withdraw_delayed": false}]}
]"#;

const BITGET_LISTING: &str = r#"{"code": "00000", "msg": "success", "data": [
    {"coin": "BTC", "chains": [{"chain": "BTC", "rechargeable": "true", "withdrawable": "true", "congestion": "normal"}]}
]}"#;

const KUCOIN_LISTING: &str = r#"{"code": "200000", "data": [
    {"currency": "BTC", "chains": [{"chainName": "BTC", "isDepositEnabled": true, "isWithdrawEnabled": true}]}
]}"#;

#[derive(Clone, Copy)]
struct ExchangeCase {
    id: ExchangeId,
    url: &'static str,
    listing: &'static str,
}

fn exchange_cases() -> Vec<ExchangeCase> {
    vec![
        ExchangeCase {
            id: ExchangeId::Gateio,
            url: GATEIO_CURRENCIES_URL,
            listing: GATEIO_LISTING,
        },
        ExchangeCase {
            id: ExchangeId::Bitget,
            url: BITGET_COINS_URL,
            listing: BITGET_LISTING,
        },
        ExchangeCase {
            id: ExchangeId::Kucoin,
            url: KUCOIN_CURRENCIES_URL,
            listing: KUCOIN_LISTING,
        },
    ]
}

fn adapter(id: ExchangeId, client: StaticHttpClient) -> Arc<dyn ExchangeAdapter> {
    let client = Arc::new(client);
    match id {
        ExchangeId::Gateio => Arc::new(GateioAdapter::new(client)),
        ExchangeId::Bitget => Arc::new(BitgetAdapter::new(client)),
        ExchangeId::Kucoin => Arc::new(KucoinAdapter::new(client)),
    }
}

fn ticker(raw: &str) -> CoinTicker {
    CoinTicker::parse(raw).expect("valid ticker")
}

#[test]
fn every_adapter_reports_its_own_id() {
    for case in exchange_cases() {
        let adapter = adapter(case.id, StaticHttpClient::new());
        assert_eq!(adapter.id(), case.id);
    }
}

#[test]
fn listed_coin_has_flags_and_chains_for_all_exchanges() {
    for case in exchange_cases() {
        let adapter = adapter(case.id, StaticHttpClient::new().with_json(case.url, case.listing));

        let report = block_on(adapter.lookup(&ticker("btc"))).into_report(case.id);

        assert!(report.found, "{} should list BTC", case.id);
        assert_eq!(report.name, case.id.display_name());
        assert_eq!(report.deposit, Some(true));
        assert_eq!(report.withdraw, Some(true));
        assert_eq!(report.withdraw_delayed, Some(false));
        assert_eq!(report.chains.as_ref().map(Vec::len), Some(1));
        assert!(report.error.is_none());
    }
}

#[test]
fn unlisted_coin_is_not_found_without_error_for_all_exchanges() {
    for case in exchange_cases() {
        let adapter = adapter(case.id, StaticHttpClient::new().with_json(case.url, case.listing));

        let report = block_on(adapter.lookup(&ticker("ZZZNOTACOIN"))).into_report(case.id);

        assert!(!report.found);
        assert!(report.error.is_none(), "{} must not report an error", case.id);
        assert!(report.chains.is_none());
        assert!(report.deposit.is_none());
    }
}

#[test]
fn transport_failure_is_reported_not_raised_for_all_exchanges() {
    for case in exchange_cases() {
        let adapter = adapter(
            case.id,
            StaticHttpClient::new().with_error(case.url, HttpError::timeout("request timed out")),
        );

        match block_on(adapter.lookup(&ticker("BTC"))) {
            LookupOutcome::Failed(error) => {
                assert_eq!(error.kind(), LookupErrorKind::Transport);
                assert!(error.message().contains(case.id.display_name()));
            }
            other => panic!("{} expected failure, got {other:?}", case.id),
        }
    }
}

#[test]
fn error_status_and_malformed_body_are_failures_for_all_exchanges() {
    for case in exchange_cases() {
        let unavailable = adapter(
            case.id,
            StaticHttpClient::new().with_response(case.url, HttpResponse::with_status(503, "busy")),
        );
        let report = block_on(unavailable.lookup(&ticker("BTC"))).into_report(case.id);
        assert!(!report.found);
        assert!(report
            .error
            .as_deref()
            .is_some_and(|message| message.contains("503")));

        let malformed = adapter(case.id, StaticHttpClient::new().with_json(case.url, "not json"));
        match block_on(malformed.lookup(&ticker("BTC"))) {
            LookupOutcome::Failed(error) => assert_eq!(error.kind(), LookupErrorKind::Decode),
            other => panic!("{} expected decode failure, got {other:?}", case.id),
        }
    }
}

#[test]
fn each_lookup_issues_exactly_one_request() {
    for case in exchange_cases() {
        let client = Arc::new(StaticHttpClient::new().with_json(case.url, case.listing));
        let adapter: Arc<dyn ExchangeAdapter> = match case.id {
            ExchangeId::Gateio => Arc::new(GateioAdapter::new(client.clone())),
            ExchangeId::Bitget => Arc::new(BitgetAdapter::new(client.clone())),
            ExchangeId::Kucoin => Arc::new(KucoinAdapter::new(client.clone())),
        };

        block_on(adapter.lookup(&ticker("BTC")));

        assert_eq!(client.request_count(), 1, "{}", case.id);
        assert_eq!(client.recorded_requests()[0].url, case.url);
    }
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
