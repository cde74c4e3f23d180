use std::sync::Arc;

use golddust::prelude::*;

// ---------------------------------------------------------------------------
// Table flow
// ---------------------------------------------------------------------------

struct Seat {
    wallet: &'static str,
    email: &'static str,
}

const ALICE: Seat = Seat { wallet: "0xa11ce", email: "alice@golddust.example" };
const BOB: Seat = Seat { wallet: "0xb0b", email: "bob@golddust.example" };

fn key(seat: &Seat) -> Result<PlayerKey, GoldDustError> {
    Ok(PlayerKey::new(seat.wallet, seat.email)?)
}

/// Moves `amount` from a player's ledger balance onto the game's roster.
///
/// The ledger debit happens first, so a player who can't cover the buy-in
/// never shows up at the table.
async fn buy_in<S: Store>(
    economy: &Economy<S>,
    game_id: &GameId,
    seat: &Seat,
    amount: i64,
) -> Result<GameRecord, GoldDustError> {
    economy.apply_delta(seat.wallet, seat.email, -amount).await?;
    economy
        .apply_player_deltas(game_id.as_str(), &[PlayerDelta::new(key(seat)?, amount)])
        .await
}

/// Deltas for one hand where `winner` takes `pot` from `loser`.
fn settle_hand(winner: &Seat, loser: &Seat, pot: i64) -> Result<Vec<PlayerDelta>, GoldDustError> {
    Ok(vec![
        PlayerDelta::new(key(winner)?, pot),
        PlayerDelta::new(key(loser)?, -pot),
    ])
}

/// Splits an unsigned roster balance into ledger credits, none larger
/// than `i64::MAX`.
fn credits(mut balance: u64) -> Vec<i64> {
    let mut out = Vec::new();
    while balance > 0 {
        let chunk = i64::try_from(balance).unwrap_or(i64::MAX);
        out.push(chunk);
        balance -= chunk.unsigned_abs();
    }
    out
}

/// Credits every roster balance back to its owner's ledger.
async fn cash_out<S: Store>(economy: &Economy<S>, game: &GameRecord) -> Result<(), GoldDustError> {
    for entry in &game.players {
        for amount in credits(entry.balance) {
            let record = economy.apply_delta(&entry.wallet, &entry.email, amount).await?;
            tracing::debug!(wallet = %entry.wallet, amount, balance = record.balance, "credit");
        }
        tracing::info!(wallet = %entry.wallet, amount = entry.balance, "cashed out");
    }
    Ok(())
}

/// Plays a short session at one table and returns the final ledger
/// balances of both players.
async fn run_table<S: Store>(economy: &Economy<S>) -> Result<(u64, u64), GoldDustError> {
    for seat in [&ALICE, &BOB] {
        let session = economy.create_or_get_session(seat.wallet, seat.email).await?;
        tracing::info!(wallet = seat.wallet, session_id = %session.session_id, "signed in");
        economy.apply_delta(seat.wallet, seat.email, 100).await?;
    }

    let game_id = economy.create_game().await?.game_id;
    buy_in(economy, &game_id, &ALICE, 40).await?;
    buy_in(economy, &game_id, &BOB, 40).await?;

    economy
        .apply_player_deltas(game_id.as_str(), &settle_hand(&ALICE, &BOB, 25)?)
        .await?;

    // Bob can't cover a second buy-in of this size; the ledger refuses it.
    match buy_in(economy, &game_id, &BOB, 500).await {
        Err(GoldDustError::Ledger(LedgerError::InsufficientBalance { balance, .. })) => {
            tracing::warn!(wallet = BOB.wallet, balance, "buy-in refused");
        }
        other => {
            other?;
        }
    }

    // A hand bigger than Bob's stack floors him at zero instead of failing.
    let game = economy
        .apply_player_deltas(game_id.as_str(), &settle_hand(&ALICE, &BOB, 30)?)
        .await?;
    match serde_json::to_string_pretty(&game) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "could not render game"),
    }

    cash_out(economy, &game).await?;

    Ok((balance(economy, &ALICE).await?, balance(economy, &BOB).await?))
}

async fn balance<S: Store>(economy: &Economy<S>, seat: &Seat) -> Result<u64, GoldDustError> {
    let record = economy.balance(seat.wallet, seat.email).await?;
    Ok(record.map_or(0, |r| r.balance))
}

#[tokio::main]
async fn main() -> Result<(), GoldDustError> {
    golddust::telemetry::init_tracing("golddust=info,walkthrough=info");

    let economy = EconomyBuilder::new().build(Arc::new(MemoryStore::new()));
    let (alice, bob) = run_table(&economy).await?;
    println!("final balances: alice={alice} bob={bob}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy() -> Economy<MemoryStore> {
        EconomyBuilder::new().build(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_table_final_balances() {
        let economy = economy();

        let (alice, bob) = run_table(&economy).await.unwrap();

        // Alice: 60 in the bank + 40 stake + 25 + 30 won.
        assert_eq!(alice, 155);
        // Bob: 60 in the bank; his 40 stake is gone after the clamped hand.
        assert_eq!(bob, 60);
    }

    #[tokio::test]
    async fn test_buy_in_without_funds_leaves_roster_alone() {
        let economy = economy();
        let game_id = economy.create_game().await.unwrap().game_id;

        let result = buy_in(&economy, &game_id, &ALICE, 10).await;

        assert!(matches!(
            result,
            Err(GoldDustError::Ledger(LedgerError::InvalidInitialBalance { .. }))
        ));
        let game = economy.game(game_id.as_str()).await.unwrap().unwrap();
        assert!(game.players.is_empty());
    }

    #[test]
    fn test_credits_cover_the_whole_balance() {
        assert!(credits(0).is_empty());
        assert_eq!(credits(95), vec![95]);
        assert_eq!(credits(i64::MAX as u64), vec![i64::MAX]);

        let split = credits(u64::MAX);
        assert_eq!(split, vec![i64::MAX, i64::MAX, 1]);
        assert_eq!(split.iter().map(|c| c.unsigned_abs()).sum::<u64>(), u64::MAX);
    }

    #[tokio::test]
    async fn test_cash_out_credits_balance_above_i64_max_in_full() {
        let economy = economy();
        let game_id = economy.create_game().await.unwrap().game_id;
        let whale = PlayerDelta::new(key(&ALICE).unwrap(), i64::MAX);
        let game = economy
            .apply_player_deltas(game_id.as_str(), &[whale.clone(), whale])
            .await
            .unwrap();
        assert_eq!(game.players[0].balance, u64::MAX - 1);

        cash_out(&economy, &game).await.unwrap();

        assert_eq!(balance(&economy, &ALICE).await.unwrap(), u64::MAX - 1);
    }

    #[test]
    fn test_settle_hand_is_zero_sum() {
        let deltas = settle_hand(&ALICE, &BOB, 7).unwrap();
        assert_eq!(deltas.iter().map(|d| d.delta).sum::<i64>(), 0);
    }
}
