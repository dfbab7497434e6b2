use criterion::{Criterion, black_box, criterion_group, criterion_main};

use std::collections::BTreeMap;

use keyward_core::{Action, Identifier, Resource, ResourceCategory, Role};
use keyward_engine::claims::{self, Claims, SignOptions};
use keyward_engine::config::{self, EngineConfig};
use keyward_engine::{AttributeMap, PendingSession, PermissionMatrix, Session};

struct Record {
    id: Identifier,
    division_id: Identifier,
}

impl Resource for Record {
    fn attribute(&self, field: &str) -> Option<Identifier> {
        match field {
            "id" => Some(self.id.clone()),
            "division_id" => Some(self.division_id.clone()),
            _ => None,
        }
    }
}

fn setup() -> (Session, PermissionMatrix) {
    let _ = config::init(EngineConfig::new(
        b"bench-secret".to_vec(),
        Identifier::new("u_service"),
    ));

    let mut matrix = PermissionMatrix::new();
    for role in [Role::Admin, Role::User, Role::Pending] {
        for category in ResourceCategory::ALL {
            matrix.allow(role, category, [Action::Read, Action::Update]);
        }
    }
    matrix.allow(Role::Admin, ResourceCategory::User, [Action::Delete]);

    let claims = Claims {
        roles: BTreeMap::from([
            (
                Role::Admin,
                (0..8).map(|i| Identifier::new(format!("d_{i}"))).collect(),
            ),
            (
                Role::User,
                (0..8).map(|i| Identifier::new(format!("u_{i}"))).collect(),
            ),
        ]),
        ..Claims::for_subject(Identifier::new("u_0"))
    };
    let header = claims::create_auth_header(&claims, &SignOptions::access()).unwrap();
    let session = PendingSession::from_header(&header)
        .unwrap()
        .authenticate()
        .unwrap();

    (session, matrix)
}

fn bench_decision(c: &mut Criterion) {
    let (session, matrix) = setup();

    let owned = Record {
        id: Identifier::new("u_3"),
        division_id: Identifier::new("d_5"),
    };
    let foreign = Record {
        id: Identifier::new("u_99"),
        division_id: Identifier::new("d_99"),
    };

    c.bench_function("can/grant", |b| {
        b.iter(|| black_box(session.can(Action::Update, black_box(&owned), &matrix)))
    });

    c.bench_function("can/deny", |b| {
        b.iter(|| black_box(session.can(Action::Update, black_box(&foreign), &matrix)))
    });

    c.bench_function("attributes/resolve", |b| {
        b.iter(|| black_box(AttributeMap::resolve(black_box(&owned))))
    });
}

fn bench_authenticate(c: &mut Criterion) {
    let (session, _) = setup();
    let header = format!("Bearer {}", session.token());

    c.bench_function("session/authenticate", |b| {
        b.iter(|| {
            PendingSession::from_header(black_box(&header))
                .unwrap()
                .authenticate()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_decision, bench_authenticate);
criterion_main!(benches);
