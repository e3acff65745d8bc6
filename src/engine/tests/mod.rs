
use std::sync::Arc;

use crate::dict::Lexicon;

use super::Engine;

/// Small lexicon for tests that should not depend on the bundled one.
pub(super) fn make_test_engine() -> Engine {
    let lexicon = Lexicon::from_toml(
        r#"
version = 1

[words]
mama = "මම"
kaeema = "කෑම"
kannavaa = "කන්නවා"
gedhara = "ගෙදර"
innee = "ඉන්නේ"
yanna = "යන්න"

[[entries]]
roman = "oonee"
script = "ඕනෑ"

[[entries]]
roman = "oonee"
script = "ඕනේ"
weight = 20
when = "after:infinitive"

[foreign]
words = ["facebook"]
"#,
    )
    .unwrap();
    Engine::new(Arc::new(lexicon))
}
