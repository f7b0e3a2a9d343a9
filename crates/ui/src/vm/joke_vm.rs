use services::{JokeTeller, TellerState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JokeVm {
    pub label: String,
    pub can_reveal: bool,
    pub showing_punchline: bool,
}

impl From<&JokeTeller> for JokeVm {
    fn from(teller: &JokeTeller) -> Self {
        Self {
            label: teller.label(),
            can_reveal: teller.can_reveal(),
            showing_punchline: matches!(teller.state(), TellerState::Punchline(_)),
        }
    }
}
