#[derive(Debug)]
pub enum Action {
    ChatTurn(String),
    ClearHistory(),
    FinalizePlan(),
}
