use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use esparse_ast::function_table::FunctionTable;
use esparse_options::ParserOptions;
use esparse_parser::{parse_module, LazyReparse, Parser};

// A medium-size module (~100 lines) with various constructs
const MODULE_SOURCE: &str = r#"
import { EventEmitter } from "events";
import * as path from "path";

const DEFAULT_PREFERENCES = {
    theme: 'light',
    notifications: true,
    language: 'en',
};

// Class definition
class UserService extends EventEmitter {
    constructor() {
        super();
        this.users = new Map();
        this.nextId = 1;
    }

    createUser(name, email, { age, ...preferences } = {}) {
        const user = {
            id: this.nextId++,
            name,
            email,
            age,
            preferences: { ...DEFAULT_PREFERENCES, ...preferences },
        };
        this.users.set(user.id, user);
        this.emit('created', user);
        return user;
    }

    getUserById(id) {
        return this.users.get(id) ?? null;
    }

    updateUser(id, updates) {
        const user = this.users.get(id);
        if (!user) return false;
        this.users.set(id, { ...user, ...updates });
        return true;
    }

    deleteUser(id) {
        return this.users.delete(id);
    }

    get size() {
        return this.users.size;
    }

    *[Symbol.iterator]() {
        yield* this.users.values();
    }
}

function filterUsers(users, predicate = (user) => true) {
    return users.filter(predicate);
}

async function fetchUserData(id) {
    const service = new UserService();
    try {
        const response = await fetch(`/users/${id}`);
        return (await response.json()) || service.getUserById(id);
    } catch {
        return null;
    }
}

const processUsers = (users) => {
    return users.reduce((count, user) => {
        if (user?.age && user.age > 18) {
            return count + 1;
        }
        return count;
    }, 0);
};

function resolveAll(roots) {
    const out = [];
    for (const root of roots) {
        for (let i = 0; i < root.length; i++) {
            switch (root[i]) {
                case '.': continue;
                case '..': out.pop(); break;
                default: out.push(path.join(root, String(i)));
            }
        }
    }
    return out;
}

export { UserService, filterUsers, processUsers, resolveAll };
export default UserService;
"#;

fn bench_parse_module(c: &mut Criterion) {
    c.bench_function("parse_module_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let output = parse_module(&arena, "bench.mjs", black_box(MODULE_SOURCE), ParserOptions::default());
            black_box(output.is_ok());
        });
    });
}

fn bench_lazy_reparse(c: &mut Criterion) {
    let arena = Bump::new();
    let full = match parse_module(&arena, "bench.mjs", MODULE_SOURCE, ParserOptions::default()) {
        Ok(output) => output,
        Err(error) => panic!("benchmark source does not parse: {error}"),
    };
    let table = FunctionTable::collect(full.program);

    c.bench_function("lazy_reparse_module_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let output = Parser::new(&arena, "bench.mjs", black_box(MODULE_SOURCE), ParserOptions::default())
                .with_lazy_reparse(LazyReparse::new(table.clone(), full.program.id))
                .parse_module();
            black_box(output.is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_module, bench_lazy_reparse);
criterion_main!(benches);
